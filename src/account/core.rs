//! The wallet account model and its database queries.

use rusqlite::{Connection, Row, TransactionBehavior};
use serde::Deserialize;

use crate::{Error, UserID, database_id::AccountId};

/// The icon used when the user does not pick one.
pub const DEFAULT_ICON: &str = "💰";

/// A named store of money such as a bank account, e-wallet or cash on hand.
///
/// Account balances are tracked independently of the transaction ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The user that owns the account.
    pub user_id: UserID,
    /// The name of the account, e.g. "BDO Savings".
    pub name: String,
    /// A free-form type label, e.g. "Bank" or "E-Wallet".
    pub kind: String,
    /// The balance, never negative.
    pub balance: f64,
    /// A glyph shown next to the account name.
    pub icon: String,
}

/// The fields needed to create an [Account].
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    /// The user the account belongs to.
    pub user_id: UserID,
    /// The display name, e.g. "Everyday".
    pub name: String,
    /// A free-form label such as "Bank" or "Cash".
    pub kind: String,
    /// The opening balance, which must not be negative.
    pub balance: f64,
    /// The glyph shown next to the account.
    pub icon: String,
}

/// Which way to move an account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustDirection {
    #[serde(alias = "plus")]
    Increase,
    #[serde(alias = "minus")]
    Decrease,
}

/// The balance after moving `balance` by `amount` in `direction`.
///
/// Increases are unbounded, decreases stop at zero.
pub fn adjust_balance(balance: f64, amount: f64, direction: AdjustDirection) -> f64 {
    match direction {
        AdjustDirection::Increase => balance + amount,
        AdjustDirection::Decrease => (balance - amount).max(0.0),
    }
}

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            balance REAL NOT NULL DEFAULT 0.0 CHECK (balance >= 0),
            icon TEXT NOT NULL DEFAULT '💰',
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        kind: row.get(3)?,
        balance: row.get(4)?,
        icon: row.get(5)?,
    })
}

/// Create a new account.
///
/// # Errors
/// Returns [Error::SqlError] if the balance is negative, the user does not exist
/// or some other SQL error occurs.
pub fn create_account(account: NewAccount, connection: &Connection) -> Result<Account, Error> {
    let account = connection
        .prepare(
            "INSERT INTO account (user_id, name, type, balance, icon) VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, name, type, balance, icon",
        )?
        .query_row(
            (
                account.user_id,
                account.name,
                account.kind,
                account.balance,
                account.icon,
            ),
            map_row_to_account,
        )?;

    Ok(account)
}

/// Get the user's accounts in the order they were created.
///
/// # Errors
/// Returns [Error::SqlError] if some SQL error occurs.
pub fn get_accounts(user_id: UserID, connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, type, balance, icon FROM account
             WHERE user_id = ?1 ORDER BY id ASC",
        )?
        .query_map((user_id,), map_row_to_account)?
        .map(|maybe_account| maybe_account.map_err(Error::from))
        .collect()
}

/// Move the balance of the user's account `account_id` by `amount` in `direction`
/// and return the updated account.
///
/// The read and the write happen in one immediate SQLite transaction.
///
/// # Errors
/// Returns:
/// - [Error::NotFound] if the account does not exist or belongs to another user,
/// - or [Error::SqlError] if some other SQL error occurs.
pub fn adjust_account_balance(
    account_id: AccountId,
    user_id: UserID,
    amount: f64,
    direction: AdjustDirection,
    connection: &Connection,
) -> Result<Account, Error> {
    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let balance: f64 = transaction.query_row(
        "SELECT balance FROM account WHERE id = ?1 AND user_id = ?2",
        (account_id, user_id),
        |row| row.get(0),
    )?;

    let account = transaction.query_row(
        "UPDATE account SET balance = ?1 WHERE id = ?2
         RETURNING id, user_id, name, type, balance, icon",
        (adjust_balance(balance, amount, direction), account_id),
        map_row_to_account,
    )?;

    transaction.commit()?;

    Ok(account)
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::create_account_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_account_table(&connection));
    }
}
