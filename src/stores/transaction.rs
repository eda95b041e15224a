//! Defines the transaction store trait.

use crate::{
    Error, TransactionType,
    transaction::{NewTransaction, Transaction},
};

/// Handles the creation, retrieval and aggregation of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// Implementers must return [Error::DuplicateReference] if the reference
    /// is already taken.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Create many transactions as a single unit.
    ///
    /// Either every transaction is stored or none are. Implementers must
    /// return [Error::DuplicateReference] if any reference collides with a
    /// stored transaction or with another transaction in `transactions`.
    fn create_many(
        &mut self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transaction with `reference`.
    fn get(&self, reference: &str) -> Result<Transaction, Error>;

    /// Retrieve transactions in the order they were stored, filtered by `query`.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// The number of transactions in the store.
    fn count(&self) -> Result<usize, Error>;

    /// Sum the inflows and outflows of every user.
    fn sum_by_type_per_user(&self) -> Result<Vec<UserTypeTotals>, Error>;

    /// Sum the amounts of `user_email`'s transactions per type and category.
    fn sum_by_category_for_user(&self, user_email: &str) -> Result<Vec<CategoryTotal>, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_query].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Only include transactions owned by this user.
    pub user_email: Option<String>,
}

/// The summed inflows and outflows of one user, in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTypeTotals {
    /// The user the totals belong to.
    pub user_email: String,
    /// The sum of the user's inflows, zero if there are none.
    pub inflow: i64,
    /// The sum of the user's outflows, zero if there are none.
    pub outflow: i64,
}

/// The summed amount of one category within one transaction type, in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// The type shared by the summed transactions.
    pub transaction_type: TransactionType,
    /// The category shared by the summed transactions.
    pub category: String,
    /// The sum of the amounts.
    pub total: i64,
}
