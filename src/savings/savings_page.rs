//! The page for moving money in and out of savings.

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
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, app_page},
    notice::take_notice,
    snapshot::{Snapshot, get_snapshot, snapshot_cards},
};

/// The state needed for the savings page and the savings transfer endpoint.
#[derive(Debug, Clone)]
pub struct SavingsState {
    pub cookie_key: Key,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SavingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<SavingsState> for Key {
    fn from_ref(state: &SavingsState) -> Self {
        state.cookie_key.clone()
    }
}

fn transfer_form(snapshot: &Snapshot) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::UPDATE_SAVINGS)
            class=(CARD_STYLE)
        {
            h2 class="mb-4 text-lg font-semibold" { "Move money" }

            p class="mb-4 text-sm text-gray-500 dark:text-gray-400"
            {
                "Available to deposit: " (snapshot.currency(snapshot.balance))
            }

            div class="mb-4"
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="flex gap-4"
            {
                button type="submit" name="action" value="deposit" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Deposit"
                }

                button type="submit" name="action" value="withdraw" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Withdraw"
                }
            }
        }
    }
}

/// Display the savings total and the deposit/withdraw form.
pub async fn get_savings_page(
    State(state): State<SavingsState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
) -> Response {
    let snapshot = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_snapshot(user_id, &connection) {
            Ok(snapshot) => snapshot,
            Err(error) => return error.into_response(),
        }
    };

    let (jar, notice) = take_notice(jar);
    let content = html! {
        (snapshot_cards(&snapshot))

        section class="flex flex-wrap gap-4 w-full"
        {
            div class=(CARD_STYLE)
            {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Total saved" }
                p id="savings-total" class="text-4xl font-bold" { (snapshot.currency(snapshot.savings)) }
            }

            (transfer_form(&snapshot))
        }
    };

    (
        jar,
        app_page("Savings", endpoints::SAVINGS, notice.as_ref(), &content),
    )
        .into_response()
}

#[cfg(test)]
mod savings_page_tests {
    use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::PrivateCookieJar;

    use crate::{
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button, assert_valid_html,
            get_test_state, must_get_form_by_action, parse_html_document, register_test_user,
            select_text,
        },
    };

    use super::{SavingsState, get_savings_page};

    #[tokio::test]
    async fn displays_savings_total_and_form() {
        let state = get_test_state();
        let user = register_test_user(&state, "foo@bar.baz", "correcthorse");
        let savings_state = SavingsState {
            cookie_key: state.cookie_key.clone(),
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        };

        let response = get_savings_page(
            State(savings_state),
            Extension(user.id),
            PrivateCookieJar::new(state.cookie_key.clone()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(select_text(&document, "#savings-total"), vec!["₱0.00"]);
        let form = must_get_form_by_action(&document, endpoints::UPDATE_SAVINGS);
        assert_form_input(&form, "amount", "number");
        assert_form_submit_button(&form);
    }
}
