//! Defines the core data models and database queries for transactions.

use std::fmt::Display;

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, UserID, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money received, e.g. a salary.
    #[serde(alias = "income")]
    Income,
    /// Money spent.
    #[serde(alias = "expense")]
    Expense,
}

impl TransactionKind {
    /// The name stored in the database and shown to the user.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Income" => Ok(TransactionKind::Income),
            "Expense" => Ok(TransactionKind::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type {other:?}").into(),
            )),
        }
    }
}

/// An income or expense recorded by a user.
///
/// Transactions are never edited, only bulk deleted with [delete_all_transactions].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserID,
    /// A short label, e.g. "Groceries at the market".
    pub name: String,
    /// The non-negative amount of money that moved.
    pub amount: f64,
    pub category: String,
    pub date: Date,
    pub kind: TransactionKind,
}

/// The fields needed to record a [Transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The user the transaction belongs to.
    pub user_id: UserID,
    /// A short description, e.g. "Groceries".
    pub name: String,
    /// The non-negative amount of money moved.
    pub amount: f64,
    /// The label used to group expenses.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the money came in or went out.
    pub kind: TransactionKind,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('Income', 'Expense')),
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Used by the per-user sums on every page.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_type ON \"transaction\"(user_id, type);",
        (),
    )?;

    Ok(())
}

/// Record a new transaction.
///
/// # Errors
/// This function will return a [Error::SqlError] if the amount is negative, the
/// user does not exist or there is some other SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, name, amount, category, date, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, user_id, name, amount, category, date, type",
        )?
        .query_row(
            (
                transaction.user_id,
                transaction.name,
                transaction.amount,
                transaction.category,
                transaction.date,
                transaction.kind,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// The sum of the amounts of the user's transactions of type `kind`, zero if there are none.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn sum_transactions(
    user_id: UserID,
    kind: TransactionKind,
    connection: &Connection,
) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\" WHERE user_id = ?1 AND type = ?2",
            (user_id, kind),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Get the user's transactions, most recently recorded first.
///
/// Pass `Some(n)` as `limit` to only get the `n` most recent transactions.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_transactions(
    user_id: UserID,
    limit: Option<u32>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    // SQLite treats a negative limit as no limit.
    let limit = limit.map(i64::from).unwrap_or(-1);

    connection
        .prepare(
            "SELECT id, user_id, name, amount, category, date, type FROM \"transaction\"
             WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2",
        )?
        .query_map((user_id, limit), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Delete every transaction belonging to the user, returning how many were deleted.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_all_transactions(user_id: UserID, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM \"transaction\" WHERE user_id = ?1", (user_id,))
        .map_err(|error| error.into())
}

/// Map a database row to a [Transaction].
///
/// The row must contain the columns id, user_id, name, amount, category, date and type in that order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
        kind: row.get(6)?,
    })
}
