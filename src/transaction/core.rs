//! Defines the core data models for transactions.

use std::fmt::Display;

use serde::Serialize;
use time::Date;

use crate::{TransactionType, amount::format_minor_units};

// ============================================================================
// MODELS
// ============================================================================

/// A stored record of money either received or spent by a user.
///
/// Transactions are immutable once stored. To create one, validate a
/// [TransactionPayload](crate::transaction::TransactionPayload) into a
/// [NewTransaction] and pass it to a
/// [TransactionStore](crate::stores::TransactionStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The unique identifier of the transaction, e.g. a bank reference number.
    pub reference: String,
    /// The email of the user that owns the transaction.
    pub user_email: String,
    /// When the transaction happened.
    pub date: Date,
    /// The amount in minor units (cents).
    ///
    /// Never negative for an inflow and never positive for an outflow.
    pub amount: i64,
    /// Whether money was received or spent.
    pub transaction_type: TransactionType,
    /// A free-form label such as "groceries" or "salary".
    pub category: String,
}

impl Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reference)
    }
}

/// A validated transaction that has not been stored yet.
///
/// Stores rely on the sign of `amount` agreeing with `transaction_type`, use
/// [TransactionPayload::validate](crate::transaction::TransactionPayload::validate)
/// to build one from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// The unique identifier of the transaction.
    pub reference: String,
    /// The email of the user that owns the transaction.
    pub user_email: String,
    /// When the transaction happened.
    pub date: Date,
    /// The amount in minor units (cents).
    pub amount: i64,
    /// Whether money was received or spent.
    pub transaction_type: TransactionType,
    /// A free-form label such as "groceries" or "salary".
    pub category: String,
}

/// The JSON representation of a [Transaction] sent to clients.
///
/// Amounts are rendered as decimal strings, e.g. `"-51.13"`, and dates as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionResponse {
    /// The email of the user that owns the transaction.
    pub user_email: String,
    /// The unique identifier of the transaction.
    pub reference: String,
    /// When the transaction happened.
    pub date: String,
    /// The amount as a decimal string with two fractional digits.
    pub amount: String,
    /// Either "inflow" or "outflow".
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-form label such as "groceries" or "salary".
    pub category: String,
}

impl From<&Transaction> for TransactionResponse {
    fn from(transaction: &Transaction) -> Self {
        Self {
            user_email: transaction.user_email.clone(),
            reference: transaction.reference.clone(),
            date: transaction.date.to_string(),
            amount: format_minor_units(transaction.amount),
            transaction_type: transaction.transaction_type,
            category: transaction.category.clone(),
        }
    }
}
