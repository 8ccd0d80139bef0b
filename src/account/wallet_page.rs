//! The wallet page: the user's accounts, a form to add one and a form per account
//! to adjust its balance.

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
    AppState, Error, UserID,
    account::core::{Account, DEFAULT_ICON, get_accounts},
    auth::get_user_by_id,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, app_page,
        format_currency, labelled_input, stat_card,
    },
    notice::take_notice,
};

/// The state needed for the wallet page and the account endpoints.
#[derive(Debug, Clone)]
pub struct WalletState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for WalletState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<WalletState> for Key {
    fn from_ref(state: &WalletState) -> Self {
        state.cookie_key.clone()
    }
}

fn amount_input(id: &str) -> Markup {
    html! {
        input
            type="number"
            name="amount"
            id=(id)
            step="0.01"
            min="0"
            placeholder="0.00"
            required
            class=(FORM_TEXT_INPUT_STYLE);
    }
}

fn account_card(account: &Account, currency_symbol: &str) -> Markup {
    let amount_id = format!("amount-{}", account.id);

    html! {
        div class=(CARD_STYLE) data-account-id=(account.id)
        {
            div class="flex items-center gap-3 mb-2"
            {
                span class="text-3xl" { (account.icon) }

                div
                {
                    p class="account-name font-semibold" { (account.name) }
                    p class="text-sm text-gray-500 dark:text-gray-400" { (account.kind) }
                }
            }

            p class="account-balance text-2xl font-bold mb-4"
            {
                (format_currency(currency_symbol, account.balance))
            }

            form
                method="post"
                action=(format_endpoint(endpoints::ADJUST_ACCOUNT, account.id))
                class="flex flex-col gap-2"
            {
                label for=(amount_id) class="sr-only" { "Amount" }
                (amount_input(&amount_id))

                div class="flex gap-2"
                {
                    button type="submit" name="action" value="plus" class=(BUTTON_PRIMARY_STYLE) { "+" }
                    button type="submit" name="action" value="minus" class=(BUTTON_PRIMARY_STYLE) { "−" }
                }
            }
        }
    }
}

fn add_account_form() -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::ADD_ACCOUNT)
            class={ (CARD_STYLE) " space-y-4" }
        {
            h2 class="text-lg font-semibold" { "Add account" }

            (labelled_input("Name", "name", "text", "", true))
            (labelled_input("Type", "type", "text", "", true))

            div
            {
                label for="balance" class=(FORM_LABEL_STYLE) { "Opening balance" }
                input
                    type="number"
                    name="balance"
                    id="balance"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (labelled_input("Icon", "icon", "text", DEFAULT_ICON, false))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add account" }
        }
    }
}

/// Display the user's accounts.
pub async fn get_wallet_page(
    State(state): State<WalletState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
) -> Response {
    let (currency_symbol, accounts) = {
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

        match get_accounts(user_id, &connection) {
            Ok(accounts) => (user.currency_symbol, accounts),
            Err(error) => return error.into_response(),
        }
    };

    let total: f64 = accounts.iter().map(|account| account.balance).sum();
    let (jar, notice) = take_notice(jar);
    let content = html! {
        section class="flex flex-wrap gap-4 w-full"
        {
            (stat_card("Total in accounts", &format_currency(&currency_symbol, total)))
        }

        section id="accounts" class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3 w-full"
        {
            @for account in &accounts {
                (account_card(account, &currency_symbol))
            }

            @if accounts.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No accounts yet." }
            }
        }

        (add_account_form())
    };

    (
        jar,
        app_page("Wallet", endpoints::WALLET, notice.as_ref(), &content),
    )
        .into_response()
}
