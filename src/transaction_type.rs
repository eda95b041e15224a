//! The direction money moves in a transaction.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

/// Whether a transaction records money received or money spent.
///
/// Inflows always carry a non-negative amount and outflows a non-positive
/// amount, see [crate::validate_amount].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received, e.g. salary.
    Inflow,
    /// Money spent, e.g. rent.
    Outflow,
}

impl TransactionType {
    /// The text used for this type in payloads and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Inflow => "inflow",
            TransactionType::Outflow => "outflow",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    /// Parse the exact, lowercase type name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inflow" => Ok(TransactionType::Inflow),
            "outflow" => Ok(TransactionType::Outflow),
            other => Err(other.to_owned()),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|other| FromSqlError::Other(format!("invalid transaction type {other:?}").into()))
    }
}
