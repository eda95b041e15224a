//! Per-user totals of stored transactions.

mod core;
mod user_summary_endpoint;

pub use core::{CategorySummary, UserSummary, summary_by_category_for_user, summary_by_type_per_user};
pub use user_summary_endpoint::get_user_summary_endpoint;
