//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params_from_iter, types::Value};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    stores::{CategoryTotal, TransactionQuery, TransactionStore, UserTypeTotals},
    transaction::{NewTransaction, Transaction},
};

const INSERT_TRANSACTION: &str =
    "INSERT INTO \"transaction\" (reference, user_email, date, amount, type, category)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
     RETURNING reference, user_email, date, amount, type, category";

/// Stores transactions in a SQLite database.
///
/// The connection is shared, so clones of the store see the same data.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The transaction table must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

/// Insert `transaction` with the prepared [INSERT_TRANSACTION] statement.
fn insert(
    statement: &mut rusqlite::Statement<'_>,
    transaction: &NewTransaction,
) -> Result<Transaction, Error> {
    statement
        .query_row(
            (
                &transaction.reference,
                &transaction.user_email,
                transaction.date,
                transaction.amount,
                transaction.transaction_type,
                &transaction.category,
            ),
            SQLiteTransactionStore::map_row,
        )
        .map_err(|error| match error {
            // The reference is the primary key, so a collision is reported as
            // either a primary key or a unique constraint failure.
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code:
                        rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                        | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateReference(transaction.reference.clone()),
            error => error.into(),
        })
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateReference] if the reference already exists,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare(INSERT_TRANSACTION)?;

        insert(&mut statement, &transaction)
    }

    /// Create many transactions inside one SQL transaction.
    ///
    /// If any insert fails, the SQL transaction is rolled back and nothing
    /// from the batch is stored.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateReference] naming the first reference, in input
    ///   order, that collides with a stored transaction or an earlier item,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create_many(
        &mut self,
        transactions: Vec<NewTransaction>,
    ) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        // Dropping `tx` without committing rolls back the batch.
        let tx = connection.unchecked_transaction()?;
        let mut created = Vec::with_capacity(transactions.len());

        // Prepare the insert statement once for reuse
        let mut statement = tx.prepare(INSERT_TRANSACTION)?;

        for transaction in &transactions {
            let stored = insert(&mut statement, transaction).inspect_err(|error| {
                tracing::debug!("rolling back batch of {}: {error}", transactions.len())
            })?;
            created.push(stored);
        }

        drop(statement);

        tx.commit()?;
        Ok(created)
    }

    /// Retrieve a transaction in the database by its `reference`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `reference` does not refer to a stored transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, reference: &str) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "SELECT reference, user_email, date, amount, type, category
                 FROM \"transaction\" WHERE reference = :reference",
            )?
            .query_row(&[(":reference", reference)], Self::map_row)?;

        Ok(transaction)
    }

    /// Query for transactions in the database, in insertion order.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![
            "SELECT reference, user_email, date, amount, type, category FROM \"transaction\""
                .to_string(),
        ];
        let mut query_parameters = vec![];

        if let Some(user_email) = query.user_email {
            query_string_parts.push(format!("WHERE user_email = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(user_email));
        }

        query_string_parts.push("ORDER BY rowid ASC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.lock()?
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count(&self) -> Result<usize, Error> {
        self.lock()?
            .query_row("SELECT COUNT(reference) FROM \"transaction\";", [], |row| {
                row.get(0)
            })
            .map_err(|error| error.into())
    }

    /// Sum inflows and outflows per user.
    ///
    /// Users are listed in the order of their first stored transaction. A
    /// user without transactions of one type gets a zero total for it.
    fn sum_by_type_per_user(&self) -> Result<Vec<UserTypeTotals>, Error> {
        self.lock()?
            .prepare(
                "SELECT user_email,
                        COALESCE(SUM(CASE WHEN type = 'inflow' THEN amount END), 0),
                        COALESCE(SUM(CASE WHEN type = 'outflow' THEN amount END), 0)
                 FROM \"transaction\"
                 GROUP BY user_email
                 ORDER BY MIN(rowid)",
            )?
            .query_map((), |row| {
                Ok(UserTypeTotals {
                    user_email: row.get(0)?,
                    inflow: row.get(1)?,
                    outflow: row.get(2)?,
                })
            })?
            .map(|maybe_totals| maybe_totals.map_err(Error::SqlError))
            .collect()
    }

    /// Sum one user's transactions per type and category, ordered by type then category.
    fn sum_by_category_for_user(&self, user_email: &str) -> Result<Vec<CategoryTotal>, Error> {
        self.lock()?
            .prepare(
                "SELECT type, category, SUM(amount)
                 FROM \"transaction\"
                 WHERE user_email = :user_email
                 GROUP BY type, category
                 ORDER BY type, category",
            )?
            .query_map(&[(":user_email", user_email)], |row| {
                Ok(CategoryTotal {
                    transaction_type: row.get(0)?,
                    category: row.get(1)?,
                    total: row.get(2)?,
                })
            })?
            .map(|maybe_total| maybe_total.map_err(Error::SqlError))
            .collect()
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    reference TEXT PRIMARY KEY NOT NULL,
                    user_email TEXT NOT NULL,
                    date TEXT NOT NULL,
                    amount INTEGER NOT NULL CHECK (amount BETWEEN -2147483648 AND 2147483647),
                    type TEXT NOT NULL CHECK (type IN ('inflow', 'outflow')),
                    category TEXT NOT NULL,
                    CHECK ((type = 'inflow' AND amount >= 0) OR (type = 'outflow' AND amount <= 0))
                    )",
            (),
        )?;

        // Both summaries filter or group by user.
        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transaction_user_email ON \"transaction\"(user_email);",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            reference: row.get(offset)?,
            user_email: row.get(offset + 1)?,
            date: row.get(offset + 2)?,
            amount: row.get(offset + 3)?,
            transaction_type: row.get(offset + 4)?,
            category: row.get(offset + 5)?,
        })
    }
}
