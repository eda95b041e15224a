//! Defines the app level error type and its conversion to JSON responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{not_found::get_404_not_found_response, transaction::ValidationError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields of a transaction payload are invalid.
    ///
    /// For a batch this holds the errors of the first invalid item only.
    #[error("invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    /// A transaction with the same reference already exists, either in the
    /// database or earlier in the same batch.
    ///
    /// References uniquely identify transactions, so the whole write is
    /// rejected rather than silently skipping the duplicate.
    #[error("a transaction with the reference \"{0}\" already exists")]
    DuplicateReference(String),

    /// The request body was valid JSON but not a transaction object or a list
    /// of transaction objects.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Error::DuplicateReference(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "reference": "transaction with this reference already exists"
                })),
            )
                .into_response(),
            Error::InvalidPayload(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "non_field_errors": message })),
            )
                .into_response(),
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "an unexpected error occurred" })),
                )
                    .into_response()
            }
        }
    }
}
