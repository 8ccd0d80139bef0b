//! Defines the route handlers for the full transaction history and for clearing it.
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
    AppState, Error, UserID,
    auth::get_user_by_id,
    endpoints,
    html::{BUTTON_DELETE_STYLE, app_page},
    notice::{Notice, redirect_with_notice, take_notice},
    transaction::{
        core::{delete_all_transactions, get_transactions},
        view::transaction_table,
    },
};

pub const HISTORY_CLEARED_MSG: &str = "Transaction history cleared.";

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<TransactionsState> for Key {
    fn from_ref(state: &TransactionsState) -> Self {
        state.cookie_key.clone()
    }
}

/// Display every transaction the user has recorded, most recent first.
pub async fn get_transactions_page(
    State(state): State<TransactionsState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
) -> Response {
    let (currency_symbol, transactions) = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        let user = match get_user_by_id(user_id, &connection) {
            Ok(user) => user,
            Err(error) => return error.into_response(),
        };

        match get_transactions(user_id, None, &connection) {
            Ok(transactions) => (user.currency_symbol, transactions),
            Err(error) => return error.into_response(),
        }
    };

    let (jar, notice) = take_notice(jar);
    let content = html! {
        div class="flex justify-between items-center"
        {
            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                (transactions.len()) " transactions"
            }

            @if !transactions.is_empty() {
                a href=(endpoints::CLEAR_HISTORY) class=(BUTTON_DELETE_STYLE) { "Clear history" }
            }
        }

        (transaction_table(&transactions, &currency_symbol))
    };

    (
        jar,
        app_page(
            "Transactions",
            endpoints::TRANSACTIONS,
            notice.as_ref(),
            &content,
        ),
    )
        .into_response()
}

/// Delete all of the user's transactions and go back to the transactions page.
///
/// Savings and wallet accounts are left untouched.
pub async fn clear_history_endpoint(
    State(state): State<TransactionsState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_all_transactions(user_id, &connection) {
        Ok(count) => {
            tracing::info!("Deleted {count} transactions for user {user_id}");
            redirect_with_notice(
                jar,
                endpoints::TRANSACTIONS,
                Notice::success(HISTORY_CLEARED_MSG),
            )
        }
        Err(error) => {
            tracing::error!("could not clear transaction history: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod transactions_page_tests {
    use axum_test::TestServer;
    use time::macros::date;

    use crate::{
        AppState, User, build_router, endpoints,
        notice::COOKIE_NOTICE,
        savings::{SavingsAction, get_savings_total, transfer},
        test_utils::{
            assert_valid_html, get_test_state, log_in_cookie, register_test_user, select_text,
        },
        transaction::{NewTransaction, TransactionKind, create_transaction, get_transactions},
    };

    fn get_server() -> (TestServer, AppState, User) {
        let state = get_test_state();
        let user = register_test_user(&state, "foo@bar.baz", "correcthorse");
        let server = TestServer::new(build_router(state.clone())).unwrap();

        (server, state, user)
    }

    fn record(state: &AppState, user: &User, name: &str, amount: f64, kind: TransactionKind) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            NewTransaction {
                user_id: user.id,
                name: name.to_owned(),
                amount,
                category: "Other".to_owned(),
                date: date!(2025 - 10 - 05),
                kind,
            },
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn lists_all_transactions_newest_first() {
        let (server, state, user) = get_server();
        for i in 1..=7 {
            record(&state, &user, &format!("t{i}"), i as f64, TransactionKind::Expense);
        }

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(log_in_cookie(&state, user.id))
            .await;

        response.assert_status_ok();
        let document = scraper::Html::parse_document(&response.text());
        assert_valid_html(&document);
        assert_eq!(
            select_text(&document, "#transactions tbody th"),
            vec!["t7", "t6", "t5", "t4", "t3", "t2", "t1"]
        );
    }

    #[tokio::test]
    async fn does_not_show_other_users_transactions() {
        let (server, state, user) = get_server();
        let other = register_test_user(&state, "bar@baz.qux", "correcthorse");
        record(&state, &other, "secret", 1.0, TransactionKind::Income);

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(log_in_cookie(&state, user.id))
            .await;

        let document = scraper::Html::parse_document(&response.text());
        assert_eq!(
            select_text(&document, "#transactions tbody td"),
            vec!["No transactions yet."]
        );
    }

    #[tokio::test]
    async fn clear_history_deletes_transactions_but_keeps_savings() {
        let (server, state, user) = get_server();
        record(&state, &user, "Pay", 1000.0, TransactionKind::Income);
        {
            let connection = state.db_connection.lock().unwrap();
            transfer(
                user.id,
                SavingsAction::Deposit,
                300.0,
                date!(2025 - 10 - 05),
                &connection,
            )
            .unwrap();
        }
        let cookie = log_in_cookie(&state, user.id);

        let response = server
            .get(endpoints::CLEAR_HISTORY)
            .add_cookie(cookie.clone())
            .await;

        assert_eq!(response.header("location"), endpoints::TRANSACTIONS);
        {
            let connection = state.db_connection.lock().unwrap();
            assert!(get_transactions(user.id, None, &connection).unwrap().is_empty());
            assert_eq!(get_savings_total(user.id, &connection), Ok(300.0));
        }

        let page = server
            .get(endpoints::TRANSACTIONS)
            .add_cookie(cookie)
            .add_cookie(response.cookie(COOKIE_NOTICE))
            .await;
        let document = scraper::Html::parse_document(&page.text());
        assert_eq!(
            select_text(&document, "#notice"),
            vec!["Transaction history cleared."]
        );
    }
}
