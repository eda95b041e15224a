//! Contains traits and implementations for objects that store [transactions](crate::transaction::Transaction).

mod transaction;

pub mod sqlite;

pub use transaction::{CategoryTotal, TransactionQuery, TransactionStore, UserTypeTotals};
