//! Code for creating the user table and fetching and updating users in the database.

use std::fmt::Display;

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash, savings::create_savings_record};

/// The display name given to users who do not provide one.
pub const DEFAULT_NAME: &str = "User";
/// The currency symbol given to users who do not choose one.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";
/// The maximum number of characters in a currency symbol.
pub const MAX_CURRENCY_SYMBOL_LENGTH: usize = 10;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ToSql for UserID {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for UserID {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(UserID)
    }
}

/// A registered user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name shown in the page header.
    pub name: String,
    /// The email address the user logs in with. Unique across users.
    pub email: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// The symbol shown before monetary amounts, e.g. "₱" or "$".
    pub currency_symbol: String,
}

/// Use `name` unless it is blank, otherwise [DEFAULT_NAME].
pub fn name_or_default(name: &str) -> &str {
    match name.trim() {
        "" => DEFAULT_NAME,
        name => name,
    }
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL DEFAULT 'User',
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                currency_symbol TEXT NOT NULL DEFAULT '₱'
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database along with their empty savings record.
///
/// The user and savings record are written in one SQL transaction, so a user
/// never exists without a savings record.
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicateEmail] if another user has already registered `email`,
/// - or [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(
    email: &str,
    name: &str,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    let transaction = connection.unchecked_transaction()?;

    let user = transaction
        .prepare(
            "INSERT INTO user (email, name, password, currency_symbol) VALUES (?1, ?2, ?3, ?4)
             RETURNING id, name, email, password, currency_symbol",
        )?
        .query_row(
            (
                email.trim(),
                name_or_default(name),
                password_hash.as_ref(),
                DEFAULT_CURRENCY_SYMBOL,
            ),
            map_user_row,
        )?;

    create_savings_record(user.id, &transaction)?;
    transaction.commit()?;

    Ok(user)
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NotFound] if `user_id` does not belong to a registered user,
/// - or [Error::SqlError] if there was an error trying to access the database.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, name, email, password, currency_symbol FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id)], map_user_row)
        .map_err(|error| error.into())
}

/// Get the user registered with `email`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NotFound] if no user has registered `email`,
/// - or [Error::SqlError] if there was an error trying to access the database.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, name, email, password, currency_symbol FROM user WHERE email = :email",
        )?
        .query_row(&[(":email", &email.trim())], map_user_row)
        .map_err(|error| error.into())
}

/// Overwrite the profile fields of the user `user_id`.
///
/// The caller is responsible for applying defaults to blank fields.
///
/// # Errors
///
/// This function will return a:
/// - [Error::DuplicateEmail] if `email` belongs to another user,
/// - [Error::NotFound] if `user_id` does not belong to a registered user,
/// - or [Error::SqlError] if some other SQL related error occurred.
pub fn update_profile(
    user_id: UserID,
    name: &str,
    email: &str,
    currency_symbol: &str,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET name = ?1, email = ?2, currency_symbol = ?3 WHERE id = ?4",
        (name, email.trim(), currency_symbol, user_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_password_hash: String = row.get(3)?;

    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        currency_symbol: row.get(4)?,
    })
}
