//! Field level validation of incoming transaction payloads.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    TransactionType,
    amount::{AmountError, parse_minor_units, validate_amount},
    transaction::NewTransaction,
};

/// The longest reference, email or category that will be stored.
pub const MAX_TEXT_LENGTH: usize = 255;

/// The key for errors that belong to a whole item rather than one field.
const NON_FIELD_ERRORS: &str = "non_field_errors";

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A single transaction as submitted by a client, before validation.
///
/// Every field is optional and accepts any JSON value, so that missing or
/// mistyped fields are reported per field instead of failing deserialization
/// outright.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionPayload {
    /// The email of the user that owns the transaction.
    pub user_email: Option<FieldValue>,
    /// The unique identifier of the transaction.
    pub reference: Option<FieldValue>,
    /// The date in the format `YYYY-MM-DD`.
    pub date: Option<FieldValue>,
    /// The amount as a decimal, e.g. `"-51.13"`.
    pub amount: Option<FieldValue>,
    /// Either "inflow" or "outflow".
    #[serde(rename = "type")]
    pub transaction_type: Option<FieldValue>,
    /// A free-form label such as "groceries".
    pub category: Option<FieldValue>,
}

/// A payload field as sent by the client.
///
/// Strings are used as is and numbers are read via their decimal text, e.g.
/// a reference of `123` becomes `"123"`. Anything else is rejected for the
/// field it was sent in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A JSON string.
    Text(String),
    /// A JSON number.
    Number(serde_json::Number),
    /// A JSON boolean, array or object.
    Other(Value),
}

impl FieldValue {
    fn into_text(self) -> Result<String, FieldError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            FieldValue::Number(number) => Ok(number.to_string()),
            FieldValue::Other(_) => Err(FieldError::NotText),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

/// The ways a single payload field can be invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field was absent or null.
    #[error("this field is required")]
    Missing,

    /// The field was neither a string nor a number.
    #[error("not a valid string")]
    NotText,

    /// The field was empty or only whitespace.
    #[error("this field may not be blank")]
    Blank,

    /// The field has more characters than allowed.
    #[error("ensure this field has no more than {0} characters")]
    TooLong(usize),

    /// The date is not a valid calendar date in the format `YYYY-MM-DD`.
    #[error("date has the wrong format, use YYYY-MM-DD")]
    InvalidDate,

    /// The transaction type is neither "inflow" nor "outflow".
    #[error("\"{0}\" is not a valid transaction type, use \"inflow\" or \"outflow\"")]
    InvalidType(String),

    /// The amount failed validation.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// A list item was not a transaction object.
    #[error("expected a transaction object")]
    NotAnObject,
}

/// The field errors of one invalid payload, keyed by field name.
///
/// Serializes to a JSON object such as
/// `{"amount": "invalid amount format"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    errors: BTreeMap<&'static str, FieldError>,
}

impl ValidationError {
    /// Record `error` against `field`, replacing any earlier error for that field.
    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// The error recorded against `field`, if any.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Whether no field errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The field errors ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{field}: {error}"))
            .collect();

        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;

        for (field, error) in self.iter() {
            map.serialize_entry(field, &error.to_string())?;
        }

        map.end()
    }
}

impl TransactionPayload {
    /// Read one item of a request body as a payload.
    ///
    /// # Errors
    /// Returns a [ValidationError] under `non_field_errors` if `item` is not
    /// a JSON object.
    pub fn from_item(item: Value) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        if !item.is_object() {
            errors.add(NON_FIELD_ERRORS, FieldError::NotAnObject);
            return Err(errors);
        }

        serde_json::from_value(item).map_err(|error| {
            tracing::debug!("could not deserialize transaction payload: {error}");
            errors.add(NON_FIELD_ERRORS, FieldError::NotAnObject);
            errors
        })
    }

    /// Check every field and convert the payload into a [NewTransaction].
    ///
    /// The amount is checked against the declared type with
    /// [validate_amount]. If the type itself is invalid, only the format of
    /// the amount is checked.
    ///
    /// # Errors
    /// Returns a [ValidationError] holding an entry for every invalid field.
    pub fn validate(self) -> Result<NewTransaction, ValidationError> {
        let mut errors = ValidationError::default();

        let user_email = check_text("user_email", self.user_email, &mut errors);
        let reference = check_text("reference", self.reference, &mut errors);
        let date = check_date(self.date, &mut errors);
        let transaction_type = check_type(self.transaction_type, &mut errors);
        let amount = check_amount(self.amount, transaction_type, &mut errors);
        let category = check_text("category", self.category, &mut errors);

        let (
            Some(user_email),
            Some(reference),
            Some(date),
            Some(amount),
            Some(transaction_type),
            Some(category),
        ) = (
            user_email,
            reference,
            date,
            amount,
            transaction_type,
            category,
        )
        else {
            return Err(errors);
        };

        Ok(NewTransaction {
            reference,
            user_email,
            date,
            amount,
            transaction_type,
            category,
        })
    }
}

impl TryFrom<TransactionPayload> for NewTransaction {
    type Error = ValidationError;

    fn try_from(payload: TransactionPayload) -> Result<Self, Self::Error> {
        payload.validate()
    }
}

impl TryFrom<Value> for NewTransaction {
    type Error = ValidationError;

    fn try_from(item: Value) -> Result<Self, Self::Error> {
        TransactionPayload::from_item(item)?.validate()
    }
}

fn check_text(
    field: &'static str,
    value: Option<FieldValue>,
    errors: &mut ValidationError,
) -> Option<String> {
    let Some(value) = value else {
        errors.add(field, FieldError::Missing);
        return None;
    };

    let value = value
        .into_text()
        .map_err(|error| errors.add(field, error))
        .ok()?;

    if value.trim().is_empty() {
        errors.add(field, FieldError::Blank);
        return None;
    }

    if value.chars().count() > MAX_TEXT_LENGTH {
        errors.add(field, FieldError::TooLong(MAX_TEXT_LENGTH));
        return None;
    }

    Some(value)
}

fn check_date(value: Option<FieldValue>, errors: &mut ValidationError) -> Option<Date> {
    let value = check_text("date", value, errors)?;

    Date::parse(value.trim(), DATE_FORMAT)
        .inspect_err(|error| tracing::debug!("could not parse date {value:?}: {error}"))
        .map_err(|_| errors.add("date", FieldError::InvalidDate))
        .ok()
}

fn check_type(value: Option<FieldValue>, errors: &mut ValidationError) -> Option<TransactionType> {
    let value = check_text("type", value, errors)?;

    value
        .parse()
        .map_err(|other| errors.add("type", FieldError::InvalidType(other)))
        .ok()
}

fn check_amount(
    value: Option<FieldValue>,
    transaction_type: Option<TransactionType>,
    errors: &mut ValidationError,
) -> Option<i64> {
    // Booleans, lists and objects are malformed amounts rather than bad text.
    let value = match value {
        Some(FieldValue::Other(_)) => {
            errors.add("amount", FieldError::Amount(AmountError::InvalidFormat));
            return None;
        }
        value => check_text("amount", value, errors)?,
    };

    let result = match transaction_type {
        Some(transaction_type) => validate_amount(&value, transaction_type),
        None => parse_minor_units(&value),
    };

    result
        .map_err(|error| errors.add("amount", FieldError::Amount(error)))
        .ok()
}

#[cfg(test)]
mod validation_tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{
        TransactionType,
        amount::AmountError,
        transaction::{
            NewTransaction,
            validation::{FieldError, MAX_TEXT_LENGTH, TransactionPayload},
        },
    };

    fn basic_payload() -> TransactionPayload {
        TransactionPayload {
            user_email: Some("janedoe@email.com".into()),
            reference: Some("000001".into()),
            date: Some("2020-01-03".into()),
            amount: Some("-51.13".into()),
            transaction_type: Some("outflow".into()),
            category: Some("groceries".into()),
        }
    }

    #[test]
    fn valid_payload_converts_amount_to_cents() {
        let transaction = basic_payload().validate();

        assert_eq!(
            transaction,
            Ok(NewTransaction {
                reference: "000001".to_owned(),
                user_email: "janedoe@email.com".to_owned(),
                date: date!(2020 - 01 - 03),
                amount: -5113,
                transaction_type: TransactionType::Outflow,
                category: "groceries".to_owned(),
            })
        );
    }

    #[test]
    fn deserializes_numeric_amount() {
        let payload = TransactionPayload::from_item(json!({
            "user_email": "janedoe@email.com",
            "reference": "000001",
            "date": "2020-01-03",
            "amount": 51.13,
            "type": "inflow",
            "category": "refund",
        }))
        .unwrap();

        let transaction = payload.validate().unwrap();

        assert_eq!(transaction.amount, 5113);
    }

    #[test]
    fn invalid_amount_is_reported_against_amount() {
        let payload = TransactionPayload {
            amount: Some("-a.13".into()),
            ..basic_payload()
        };

        let errors = payload.validate().unwrap_err();

        assert_eq!(
            errors.get("amount"),
            Some(&FieldError::Amount(AmountError::InvalidFormat))
        );
    }

    #[test]
    fn sign_mismatch_is_reported_against_amount() {
        let payload = TransactionPayload {
            transaction_type: Some("inflow".into()),
            ..basic_payload()
        };

        let errors = payload.validate().unwrap_err();

        assert_eq!(
            errors.get("amount"),
            Some(&FieldError::Amount(AmountError::SignMismatch(
                TransactionType::Inflow
            )))
        );
    }

    #[test]
    fn invalid_type_skips_sign_check() {
        let payload = TransactionPayload {
            transaction_type: Some("sideways".into()),
            ..basic_payload()
        };

        let errors = payload.validate().unwrap_err();

        assert_eq!(
            errors.get("type"),
            Some(&FieldError::InvalidType("sideways".to_owned()))
        );
        assert_eq!(errors.get("amount"), None);
    }

    #[test]
    fn reports_every_invalid_field() {
        let payload = TransactionPayload {
            user_email: None,
            date: Some("03/01/2020".into()),
            category: Some("   ".into()),
            ..basic_payload()
        };

        let errors = payload.validate().unwrap_err();

        assert_eq!(errors.get("user_email"), Some(&FieldError::Missing));
        assert_eq!(errors.get("date"), Some(&FieldError::InvalidDate));
        assert_eq!(errors.get("category"), Some(&FieldError::Blank));
        assert_eq!(errors.get("reference"), None);
        assert_eq!(errors.iter().count(), 3);
    }

    #[test]
    fn rejects_impossible_dates() {
        let payload = TransactionPayload {
            date: Some("2020-02-30".into()),
            ..basic_payload()
        };

        let errors = payload.validate().unwrap_err();

        assert_eq!(errors.get("date"), Some(&FieldError::InvalidDate));
    }

    #[test]
    fn rejects_overly_long_reference() {
        let payload = TransactionPayload {
            reference: Some("x".repeat(MAX_TEXT_LENGTH + 1).as_str().into()),
            ..basic_payload()
        };

        let errors = payload.validate().unwrap_err();

        assert_eq!(
            errors.get("reference"),
            Some(&FieldError::TooLong(MAX_TEXT_LENGTH))
        );
    }

    #[test]
    fn serializes_as_field_to_message_map() {
        let payload = TransactionPayload {
            amount: Some("51.13".into()),
            reference: None,
            ..basic_payload()
        };

        let errors = payload.validate().unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({
                "amount": "amount should be a negative decimal for an outflow transaction",
                "reference": "this field is required",
            })
        );
    }

    #[test]
    fn numeric_text_fields_are_read_as_text() {
        let payload = TransactionPayload::from_item(json!({
            "user_email": "janedoe@email.com",
            "reference": 123,
            "date": "2020-01-03",
            "amount": "-51.13",
            "type": "outflow",
            "category": 7,
        }))
        .unwrap();

        let transaction = payload.validate().unwrap();

        assert_eq!(transaction.reference, "123");
        assert_eq!(transaction.category, "7");
    }

    #[test]
    fn non_text_values_are_reported_per_field() {
        let payload = TransactionPayload::from_item(json!({
            "user_email": ["janedoe@email.com"],
            "reference": "000001",
            "date": "2020-01-03",
            "amount": true,
            "type": "outflow",
            "category": { "name": "groceries" },
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();

        assert_eq!(errors.get("user_email"), Some(&FieldError::NotText));
        assert_eq!(errors.get("category"), Some(&FieldError::NotText));
        assert_eq!(
            errors.get("amount"),
            Some(&FieldError::Amount(AmountError::InvalidFormat))
        );
        assert_eq!(errors.iter().count(), 3);
    }

    #[test]
    fn null_field_is_missing() {
        let payload = TransactionPayload::from_item(json!({
            "user_email": "janedoe@email.com",
            "reference": null,
            "date": "2020-01-03",
            "amount": "-51.13",
            "type": "outflow",
            "category": "groceries",
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();

        assert_eq!(errors.get("reference"), Some(&FieldError::Missing));
    }

    #[test]
    fn non_object_item_is_a_non_field_error() {
        let errors = TransactionPayload::from_item(json!(42)).unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "non_field_errors": "expected a transaction object" })
        );
    }
}
