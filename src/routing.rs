//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    stores::TransactionStore,
    summary::get_user_summary_endpoint,
    transaction::{
        create_transactions_endpoint, get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transactions_endpoint::<T>).get(list_transactions_endpoint::<T>),
        )
        .route(endpoints::TRANSACTION, get(get_transaction_endpoint::<T>))
        .route(endpoints::USER_SUMMARY, get(get_user_summary_endpoint::<T>))
        .fallback(get_404_not_found)
        .with_state(state)
}
