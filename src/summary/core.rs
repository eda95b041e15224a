//! Aggregations over stored transactions and their JSON shapes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Error, TransactionType, amount::format_minor_units, stores::TransactionStore};

/// The total inflow and outflow of one user.
///
/// Totals are decimal strings, e.g. `"2651.44"`. A user with no transactions
/// of a type has a total of `"0.00"` for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// The user the totals belong to.
    pub user_email: String,
    /// The sum of the user's inflows.
    pub total_inflow: String,
    /// The sum of the user's outflows, zero or negative.
    pub total_outflow: String,
}

/// One user's totals per category, split by transaction type.
///
/// Only categories that have transactions appear, ordered by name.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Category name to total inflow.
    pub inflow: BTreeMap<String, String>,
    /// Category name to total outflow.
    pub outflow: BTreeMap<String, String>,
}

/// Sum the inflows and outflows of every user in `store`.
///
/// Users are listed in the order their first transaction was stored.
///
/// # Errors
/// Returns any error from `store`.
pub fn summary_by_type_per_user<T>(store: &T) -> Result<Vec<UserSummary>, Error>
where
    T: TransactionStore,
{
    let summaries = store
        .sum_by_type_per_user()?
        .into_iter()
        .map(|totals| UserSummary {
            user_email: totals.user_email,
            total_inflow: format_minor_units(totals.inflow),
            total_outflow: format_minor_units(totals.outflow),
        })
        .collect();

    Ok(summaries)
}

/// Sum the transactions of `user_email` per category, split by type.
///
/// An unknown user gets a summary with two empty maps.
///
/// # Errors
/// Returns any error from `store`.
pub fn summary_by_category_for_user<T>(store: &T, user_email: &str) -> Result<CategorySummary, Error>
where
    T: TransactionStore,
{
    let mut summary = CategorySummary::default();

    for total in store.sum_by_category_for_user(user_email)? {
        let totals = match total.transaction_type {
            TransactionType::Inflow => &mut summary.inflow,
            TransactionType::Outflow => &mut summary.outflow,
        };

        totals.insert(total.category, format_minor_units(total.total));
    }

    Ok(summary)
}
