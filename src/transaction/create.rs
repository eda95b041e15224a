//! Validate-then-store operations for single transactions and batches.

use crate::{
    Error,
    stores::TransactionStore,
    transaction::{NewTransaction, Transaction, ValidationError},
};

/// Validate `payload` and store it as a new transaction.
///
/// `payload` is anything that validates into a [NewTransaction], such as a
/// [TransactionPayload](crate::transaction::TransactionPayload) or a JSON
/// value from a request body.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] if any field of `payload` is invalid,
/// - [Error::DuplicateReference] if the reference is already taken,
/// - or any other error returned by `store`.
pub fn create_one<T, P>(payload: P, store: &mut T) -> Result<Transaction, Error>
where
    T: TransactionStore,
    P: TryInto<NewTransaction, Error = ValidationError>,
{
    let transaction = payload.try_into()?;

    store.create(transaction)
}

/// Validate every payload in `payloads` and store them as one unit.
///
/// Payloads are validated one at a time in input order before anything is
/// written. The errors of the first invalid payload are returned and nothing
/// is stored.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] holding the field errors of the first invalid payload,
/// - [Error::DuplicateReference] if a reference is already taken or repeated
///   within the batch,
/// - or any other error returned by `store`.
pub fn create_many<T, P>(payloads: Vec<P>, store: &mut T) -> Result<Vec<Transaction>, Error>
where
    T: TransactionStore,
    P: TryInto<NewTransaction, Error = ValidationError>,
{
    let transactions = payloads
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<NewTransaction>, _>>()?;

    store.create_many(transactions)
}
