//! Defines the endpoint for creating one or many transactions.
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{
    Error,
    app_state::TransactionState,
    stores::TransactionStore,
    transaction::{TransactionResponse, create_many, create_one},
};

/// A route handler for creating transactions.
///
/// A JSON object creates a single transaction and responds with it. A JSON
/// array creates every transaction in it as one unit and responds with the
/// list. Either way the response status is 201 Created.
///
/// Items of a list are validated in order and the errors of the first
/// invalid item are returned.
pub async fn create_transactions_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Json(body): Json<Value>,
) -> Result<Response, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let mut store = state.transaction_store;

    match body {
        Value::Array(items) => {
            let batch_size = items.len();

            let transactions = create_many(items, &mut store)
                .inspect_err(|error| tracing::debug!("rejected batch of {batch_size}: {error}"))?;

            let body: Vec<TransactionResponse> =
                transactions.iter().map(TransactionResponse::from).collect();

            Ok((StatusCode::CREATED, Json(body)).into_response())
        }
        item @ Value::Object(_) => {
            let transaction = create_one(item, &mut store)
                .inspect_err(|error| tracing::debug!("rejected transaction: {error}"))?;

            Ok((
                StatusCode::CREATED,
                Json(TransactionResponse::from(&transaction)),
            )
                .into_response())
        }
        _ => Err(Error::InvalidPayload(
            "expected a transaction object or a list of transaction objects".to_owned(),
        )),
    }
}
