//! Defines the endpoint for a user's per-category totals.
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    app_state::TransactionState,
    stores::TransactionStore,
    summary::{CategorySummary, summary_by_category_for_user},
};

/// A route handler for summarising a user's transactions by category.
pub async fn get_user_summary_endpoint<T>(
    State(state): State<TransactionState<T>>,
    Path(user_email): Path<String>,
) -> Result<Json<CategorySummary>, Error>
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    summary_by_category_for_user(&state.transaction_store, &user_email).map(Json)
}
