//! Defines the endpoint for adding an account to the wallet.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use serde::Deserialize;

use crate::{
    Error, UserID,
    account::{
        core::{DEFAULT_ICON, NewAccount, create_account},
        wallet_page::WalletState,
    },
    amount::{INVALID_AMOUNT_MSG, parse_amount},
    endpoints,
    notice::{Notice, redirect_with_notice},
};

pub const ACCOUNT_ADDED_MSG: &str = "Account added!";
pub const MISSING_NAME_MSG: &str = "Please enter a name for the account.";
pub const NEGATIVE_BALANCE_MSG: &str = "The opening balance cannot be negative.";

/// The form data for adding an account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountForm {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// The raw opening balance text, blank counts as zero.
    #[serde(default)]
    pub balance: String,
    /// Blank icons are replaced with the default icon.
    #[serde(default)]
    pub icon: Option<String>,
}

impl AccountForm {
    /// Validate the form and turn it into an account for `user_id`.
    ///
    /// # Errors
    /// Returns the message to show the user if a field is invalid.
    pub fn into_new_account(self, user_id: UserID) -> Result<NewAccount, &'static str> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(MISSING_NAME_MSG);
        }

        let balance = match parse_amount(&self.balance) {
            Some(balance) if balance < 0.0 => return Err(NEGATIVE_BALANCE_MSG),
            Some(balance) => balance,
            None => return Err(INVALID_AMOUNT_MSG),
        };

        let icon = match self.icon.as_deref().map(str::trim) {
            Some(icon) if !icon.is_empty() => icon.to_owned(),
            _ => DEFAULT_ICON.to_owned(),
        };

        Ok(NewAccount {
            user_id,
            name: name.to_owned(),
            kind: self.kind.trim().to_owned(),
            balance,
            icon,
        })
    }
}

/// A route handler for adding an account, redirects to the wallet page with a notice.
pub async fn create_account_endpoint(
    State(state): State<WalletState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
    Form(form): Form<AccountForm>,
) -> Response {
    let new_account = match form.into_new_account(user_id) {
        Ok(new_account) => new_account,
        Err(message) => {
            return redirect_with_notice(jar, endpoints::WALLET, Notice::error(message));
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_account(new_account, &connection) {
        Ok(account) => {
            tracing::info!("Created account {} for user {user_id}", account.id);
            redirect_with_notice(jar, endpoints::WALLET, Notice::success(ACCOUNT_ADDED_MSG))
        }
        Err(error) => {
            tracing::error!("could not create account: {error}");
            error.into_response()
        }
    }
}
