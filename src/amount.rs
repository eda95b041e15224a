//! Conversion between user supplied decimal amounts and integer minor units (cents).
//!
//! Amounts are stored as whole cents. Parsing goes through [Decimal] rather
//! than `f64`, so `"0.29"` becomes exactly `29` cents.

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::TransactionType;

/// The number of fractional digits in a formatted amount.
const MINOR_UNIT_SCALE: u32 = 2;

/// The smallest amount that can be stored, in minor units.
///
/// Amounts are limited to a 32-bit range so that summing every stored amount
/// cannot overflow a 64-bit integer.
pub const MIN_MINOR_UNITS: i64 = i32::MIN as i64;

/// The largest amount that can be stored, in minor units.
pub const MAX_MINOR_UNITS: i64 = i32::MAX as i64;

/// The reasons a user supplied amount can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The text is not a base-10 decimal number.
    #[error("invalid amount format")]
    InvalidFormat,

    /// The amount is outside [MIN_MINOR_UNITS]..=[MAX_MINOR_UNITS].
    #[error(
        "ensure the amount is between {} and {}",
        format_minor_units(MIN_MINOR_UNITS),
        format_minor_units(MAX_MINOR_UNITS)
    )]
    OutOfRange,

    /// The sign of the amount contradicts the declared transaction type.
    #[error(
        "amount should be a {} decimal for an {} transaction",
        expected_sign(.0),
        .0
    )]
    SignMismatch(TransactionType),
}

fn expected_sign(transaction_type: &TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Inflow => "positive",
        TransactionType::Outflow => "negative",
    }
}

/// Convert `amount` to minor units and check it agrees with `transaction_type`.
///
/// Inflows must not be negative and outflows must not be positive. Zero is
/// accepted for either type.
///
/// # Errors
/// Returns [AmountError::InvalidFormat] if `amount` cannot be parsed (this is
/// checked first), [AmountError::OutOfRange] if it is too large to store,
/// otherwise [AmountError::SignMismatch] if the sign is wrong.
pub fn validate_amount(
    amount: &str,
    transaction_type: TransactionType,
) -> Result<i64, AmountError> {
    let minor_units = parse_minor_units(amount)?;

    let sign_mismatch = match transaction_type {
        TransactionType::Inflow => minor_units < 0,
        TransactionType::Outflow => minor_units > 0,
    };

    if sign_mismatch {
        return Err(AmountError::SignMismatch(transaction_type));
    }

    Ok(minor_units)
}

/// Parse a decimal string such as `"-51.13"` into minor units, e.g. `-5113`.
///
/// Digits beyond the second fractional place are truncated toward zero.
/// Scientific notation (`"1.5e2"`) is accepted.
///
/// Leading `+` signs, a missing integer or fractional part (`".5"`, `"5."`)
/// and `_` digit separators are accepted.
///
/// # Errors
/// Returns [AmountError::InvalidFormat] if `amount` is not a decimal number, or
/// [AmountError::OutOfRange] if it is outside
/// [MIN_MINOR_UNITS]..=[MAX_MINOR_UNITS] once scaled.
pub fn parse_minor_units(amount: &str) -> Result<i64, AmountError> {
    let amount = amount.trim();

    let decimal = Decimal::from_str(amount)
        .or_else(|_| Decimal::from_scientific(amount))
        .map_err(|_| AmountError::InvalidFormat)?;

    decimal
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.trunc().to_i64())
        .filter(|minor_units| (MIN_MINOR_UNITS..=MAX_MINOR_UNITS).contains(minor_units))
        .ok_or(AmountError::OutOfRange)
}

/// Render minor units as a decimal string with exactly two fractional digits.
///
/// ```
/// use cashflow_rs::format_minor_units;
///
/// assert_eq!(format_minor_units(-5113), "-51.13");
/// assert_eq!(format_minor_units(265144), "2651.44");
/// assert_eq!(format_minor_units(0), "0.00");
/// ```
pub fn format_minor_units(amount: i64) -> String {
    format!("{:.2}", Decimal::new(amount, MINOR_UNIT_SCALE))
}
