//! Defines the endpoint for recording a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    AppState, Error, UserID,
    amount::{INVALID_AMOUNT_MSG, parse_amount},
    endpoints,
    notice::{Notice, redirect_with_notice},
    timezone::get_local_date,
    transaction::core::{NewTransaction, TransactionKind, create_transaction},
};

pub const TRANSACTION_RECORDED_MSG: &str = "Transaction recorded!";
pub const NEGATIVE_AMOUNT_MSG: &str = "The amount cannot be negative.";
pub const INVALID_DATE_MSG: &str = "Please enter a valid date (YYYY-MM-DD).";

/// The state needed to record a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub cookie_key: Key,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<CreateTransactionState> for Key {
    fn from_ref(state: &CreateTransactionState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Text describing the transaction.
    pub name: String,
    /// The raw amount text, blank counts as zero.
    #[serde(default)]
    pub amount: String,
    pub category: String,
    /// The raw date text in the form "YYYY-MM-DD", today if left blank.
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Parse the text of a date field, `None` if the field is blank.
fn parse_date(raw_date: &str) -> Result<Option<Date>, time::error::Parse> {
    let raw_date = raw_date.trim();

    if raw_date.is_empty() {
        return Ok(None);
    }

    Date::parse(raw_date, format_description!("[year]-[month]-[day]")).map(Some)
}

/// A route handler for recording a transaction, redirects to the dashboard with a notice.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
    Form(form): Form<TransactionForm>,
) -> Response {
    let amount = match parse_amount(&form.amount) {
        Some(amount) if amount < 0.0 => {
            return redirect_with_notice(jar, endpoints::ROOT, Notice::error(NEGATIVE_AMOUNT_MSG));
        }
        Some(amount) => amount,
        None => {
            return redirect_with_notice(jar, endpoints::ROOT, Notice::error(INVALID_AMOUNT_MSG));
        }
    };

    let date = match parse_date(&form.date) {
        Ok(Some(date)) => date,
        Ok(None) => match get_local_date(&state.local_timezone) {
            Some(today) => today,
            None => {
                tracing::error!("Invalid timezone {}", state.local_timezone);
                return Error::InvalidTimezoneError(state.local_timezone).into_response();
            }
        },
        Err(error) => {
            tracing::debug!("Rejected transaction date {:?}: {error}", form.date);
            return redirect_with_notice(jar, endpoints::ROOT, Notice::error(INVALID_DATE_MSG));
        }
    };

    let transaction = NewTransaction {
        user_id,
        name: form.name.trim().to_owned(),
        amount,
        category: form.category.trim().to_owned(),
        date,
        kind: form.kind,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    if let Err(error) = create_transaction(transaction, &connection) {
        tracing::error!("could not create transaction: {error}");

        return error.into_response();
    }

    redirect_with_notice(
        jar,
        endpoints::ROOT,
        Notice::success(TRANSACTION_RECORDED_MSG),
    )
}
