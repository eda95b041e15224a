//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::stores::TransactionStore;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<T> AppState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(transaction_store: T) -> Self {
        Self { transaction_store }
    }
}

/// The state needed to create, list or summarise transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<T>
where
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [transactions](crate::transaction::Transaction).
    pub transaction_store: T,
}

impl<T> FromRef<AppState<T>> for TransactionState<T>
where
    T: TransactionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<T>) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}
