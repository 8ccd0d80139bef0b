//! This file defines the dashboard route and its handlers.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID, endpoints,
    expense_breakdown::{expense_breakdown_view, get_expense_breakdown},
    html::{LINK_STYLE, app_page},
    notice::take_notice,
    snapshot::{get_snapshot, snapshot_cards},
    timezone::get_local_date,
    transaction::{get_transactions, new_transaction_form, transaction_table},
};

/// How many of the latest transactions to show on the dashboard.
const RECENT_TRANSACTION_COUNT: u32 = 5;

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub cookie_key: Key,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<DashboardState> for Key {
    fn from_ref(state: &DashboardState) -> Self {
        state.cookie_key.clone()
    }
}

/// Display the user's snapshot, their latest transactions, their spending by
/// category and the form for recording a transaction.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
) -> Response {
    let Some(today) = get_local_date(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let (snapshot, recent_transactions, breakdown) = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        let snapshot = match get_snapshot(user_id, &connection) {
            Ok(snapshot) => snapshot,
            Err(error) => return error.into_response(),
        };

        let recent_transactions =
            match get_transactions(user_id, Some(RECENT_TRANSACTION_COUNT), &connection) {
                Ok(transactions) => transactions,
                Err(error) => return error.into_response(),
            };

        match get_expense_breakdown(user_id, &connection) {
            Ok(breakdown) => (snapshot, recent_transactions, breakdown),
            Err(error) => return error.into_response(),
        }
    };

    let (jar, notice) = take_notice(jar);
    let content = html! {
        p id="greeting" class="text-lg" { "Welcome back, " (snapshot.name) "!" }

        (snapshot_cards(&snapshot))

        div class="grid gap-6 lg:grid-cols-3 w-full"
        {
            section class="lg:col-span-2 space-y-2"
            {
                div class="flex justify-between items-center"
                {
                    h2 class="text-lg font-semibold" { "Recent transactions" }
                    a href=(endpoints::TRANSACTIONS) class=(LINK_STYLE) { "View all" }
                }

                (transaction_table(&recent_transactions, &snapshot.currency_symbol))
            }

            (new_transaction_form(today))
        }

        (expense_breakdown_view(&breakdown, &snapshot.currency_symbol))
    };

    (
        jar,
        app_page("Dashboard", endpoints::ROOT, notice.as_ref(), &content),
    )
        .into_response()
}
