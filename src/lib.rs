//! Cashflow is a service for recording users' financial transactions and
//! summarising where their money comes from and goes to.
//!
//! This library provides a JSON REST API backed by SQLite. Transactions are
//! created one at a time or in atomic batches, and can be summarised per user
//! by transaction type or by category.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod amount;
mod app_state;
mod db;
pub mod endpoints;
mod error;
mod logging;
mod not_found;
mod routing;
pub mod stores;
mod summary;
mod transaction;
mod transaction_type;

#[cfg(test)]
mod test_utils;

pub use amount::{AmountError, format_minor_units, parse_minor_units, validate_amount};
pub use app_state::{AppState, TransactionState};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use summary::{
    CategorySummary, UserSummary, summary_by_category_for_user, summary_by_type_per_user,
};
pub use transaction::{
    FieldError, FieldValue, NewTransaction, Transaction, TransactionPayload, TransactionResponse,
    ValidationError, create_many, create_one,
};
pub use transaction_type::TransactionType;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
