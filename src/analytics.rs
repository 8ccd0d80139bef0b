//! The analytics page: spending by category and how income compares to expenses.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID, endpoints,
    expense_breakdown::{expense_breakdown_view, get_expense_breakdown, percentage_share},
    html::{CARD_STYLE, app_page},
    notice::take_notice,
    snapshot::{Snapshot, get_snapshot, snapshot_cards},
};

/// The state needed for the analytics page.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<AnalyticsState> for Key {
    fn from_ref(state: &AnalyticsState) -> Self {
        state.cookie_key.clone()
    }
}

/// Income and expense as percentages of everything that moved.
fn income_expense_split(snapshot: &Snapshot) -> (f64, f64) {
    let turnover = snapshot.total_income + snapshot.total_expense;

    (
        percentage_share(snapshot.total_income, turnover),
        percentage_share(snapshot.total_expense, turnover),
    )
}

fn income_expense_view(snapshot: &Snapshot) -> Markup {
    let (income_share, expense_share) = income_expense_split(snapshot);

    html! {
        section id="income-expense" class={ (CARD_STYLE) " w-full space-y-3" }
        {
            h2 class="text-lg font-semibold" { "Income vs. expenses" }

            div class="flex w-full h-4 overflow-hidden rounded bg-gray-200 dark:bg-gray-700"
            {
                div class="h-4 bg-green-500" style={ "width: " (format!("{income_share:.0}")) "%" } {}
                div class="h-4 bg-red-500" style={ "width: " (format!("{expense_share:.0}")) "%" } {}
            }

            dl class="grid grid-cols-2 gap-4 text-sm"
            {
                div
                {
                    dt class="text-gray-500 dark:text-gray-400" { "Income" }
                    dd id="income-share" class="font-semibold" { (format!("{income_share:.1}%")) }
                }

                div
                {
                    dt class="text-gray-500 dark:text-gray-400" { "Expenses" }
                    dd id="expense-share" class="font-semibold" { (format!("{expense_share:.1}%")) }
                }
            }
        }
    }
}

/// Display the snapshot, the expense totals per category and the income/expense split.
pub async fn get_analytics_page(
    State(state): State<AnalyticsState>,
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
        (income_expense_view(&snapshot))
        (expense_breakdown_view(&breakdown, &snapshot.currency_symbol))
    };

    (
        jar,
        app_page("Analytics", endpoints::ANALYTICS, notice.as_ref(), &content),
    )
        .into_response()
}

#[cfg(test)]
mod analytics_tests {
    use axum_test::TestServer;
    use time::macros::date;

    use crate::{
        build_router, endpoints,
        snapshot::Snapshot,
        test_utils::{
            assert_valid_html, get_test_state, log_in_cookie, register_test_user, select_text,
        },
        transaction::{NewTransaction, TransactionKind, create_transaction},
    };

    use super::income_expense_split;

    fn snapshot(total_income: f64, total_expense: f64) -> Snapshot {
        Snapshot {
            name: "User".to_owned(),
            email: "foo@bar.baz".to_owned(),
            currency_symbol: "₱".to_owned(),
            total_income,
            total_expense,
            balance: total_income - total_expense,
            savings: 0.0,
        }
    }

    #[test]
    fn split_is_zero_without_transactions() {
        assert_eq!(income_expense_split(&snapshot(0.0, 0.0)), (0.0, 0.0));
    }

    #[test]
    fn split_sums_to_one_hundred() {
        assert_eq!(income_expense_split(&snapshot(300.0, 100.0)), (75.0, 25.0));
    }

    #[tokio::test]
    async fn page_shows_split_and_breakdown() {
        let state = get_test_state();
        let user = register_test_user(&state, "foo@bar.baz", "correcthorse");
        {
            let connection = state.db_connection.lock().unwrap();
            for (category, amount, kind) in [
                ("Salary", 800.0, TransactionKind::Income),
                ("Food", 200.0, TransactionKind::Expense),
            ] {
                create_transaction(
                    NewTransaction {
                        user_id: user.id,
                        name: category.to_owned(),
                        amount,
                        category: category.to_owned(),
                        date: date!(2025 - 10 - 05),
                        kind,
                    },
                    &connection,
                )
                .unwrap();
            }
        }
        let server = TestServer::new(build_router(state.clone())).unwrap();

        let response = server
            .get(endpoints::ANALYTICS)
            .add_cookie(log_in_cookie(&state, user.id))
            .await;

        response.assert_status_ok();
        let document = scraper::Html::parse_document(&response.text());
        assert_valid_html(&document);
        assert_eq!(select_text(&document, "#income-share"), vec!["80.0%"]);
        assert_eq!(select_text(&document, "#expense-share"), vec!["20.0%"]);
        assert_eq!(
            select_text(&document, "#expense-breakdown tbody th"),
            vec!["Food"]
        );
    }
}
