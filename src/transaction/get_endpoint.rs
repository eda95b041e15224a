//! Defines the endpoint for retrieving a single transaction.
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error, app_state::TransactionState, stores::TransactionStore,
    transaction::TransactionResponse,
};

/// A route handler for getting a transaction by its reference.
///
/// # Errors
/// Responds with 404 Not Found if no transaction has the reference.
pub async fn get_transaction_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(reference): Path<String>,
) -> Result<Json<TransactionResponse>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let transaction = state.transaction_store.get(&reference)?;

    Ok(Json(TransactionResponse::from(&transaction)))
}
