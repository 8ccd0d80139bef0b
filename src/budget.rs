//! The budget page: the snapshot and where the money went, by category.

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
    html::app_page,
    notice::take_notice,
    snapshot::{get_snapshot, snapshot_cards},
};

/// The state needed for the budget page.
#[derive(Debug, Clone)]
pub struct BudgetState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<BudgetState> for Key {
    fn from_ref(state: &BudgetState) -> Self {
        state.cookie_key.clone()
    }
}

/// Display the snapshot and the expense totals per category.
pub async fn get_budget_page(
    State(state): State<BudgetState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
) -> Response {
    let (snapshot, breakdown) = {
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

        match get_expense_breakdown(user_id, &connection) {
            Ok(breakdown) => (snapshot, breakdown),
            Err(error) => return error.into_response(),
        }
    };

    let (jar, notice) = take_notice(jar);
    let content = html! {
        (snapshot_cards(&snapshot))
        (expense_breakdown_view(&breakdown, &snapshot.currency_symbol))
    };

    (
        jar,
        app_page("Budget", endpoints::BUDGET, notice.as_ref(), &content),
    )
        .into_response()
}
