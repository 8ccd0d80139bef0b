//! Defines the endpoint for manually increasing or decreasing an account balance.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use serde::Deserialize;

use crate::{
    Error, UserID,
    account::{
        core::{AdjustDirection, adjust_account_balance},
        wallet_page::WalletState,
    },
    amount::{INVALID_AMOUNT_MSG, parse_amount},
    database_id::AccountId,
    endpoints,
    notice::{Notice, redirect_with_notice},
};

pub const BALANCE_UPDATED_MSG: &str = "Balance updated!";
pub const NEGATIVE_ADJUSTMENT_MSG: &str = "The amount cannot be negative.";

/// The form data for adjusting a balance.
#[derive(Debug, Deserialize)]
pub struct AdjustForm {
    /// The raw amount text, blank counts as zero.
    #[serde(default)]
    pub amount: String,
    pub action: AdjustDirection,
}

/// A route handler for adjusting an account balance, redirects to the wallet page.
///
/// Responds with the 404 page if the account does not exist or belongs to another user.
pub async fn adjust_account_endpoint(
    State(state): State<WalletState>,
    Extension(user_id): Extension<UserID>,
    Path(account_id): Path<AccountId>,
    jar: PrivateCookieJar,
    Form(form): Form<AdjustForm>,
) -> Response {
    let amount = match parse_amount(&form.amount) {
        Some(amount) if amount < 0.0 => {
            return redirect_with_notice(
                jar,
                endpoints::WALLET,
                Notice::error(NEGATIVE_ADJUSTMENT_MSG),
            );
        }
        Some(amount) => amount,
        None => {
            return redirect_with_notice(jar, endpoints::WALLET, Notice::error(INVALID_AMOUNT_MSG));
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match adjust_account_balance(account_id, user_id, amount, form.action, &connection) {
        Ok(account) => {
            tracing::debug!(
                "Account {} balance is now {} for user {user_id}",
                account.id,
                account.balance
            );
            redirect_with_notice(jar, endpoints::WALLET, Notice::success(BALANCE_UPDATED_MSG))
        }
        Err(Error::NotFound) => {
            tracing::warn!("User {user_id} tried to adjust missing or foreign account {account_id}");
            Error::NotFound.into_response()
        }
        Err(error) => {
            tracing::error!("could not adjust account {account_id}: {error}");
            error.into_response()
        }
    }
}
