//! Defines the endpoint for depositing into and withdrawing from savings.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar};
use serde::Deserialize;

use crate::{
    Error, UserID,
    amount::{INVALID_AMOUNT_MSG, parse_amount},
    auth::get_user_by_id,
    endpoints,
    html::format_currency,
    notice::{Notice, redirect_with_notice},
    savings::{
        core::{SavingsAction, TransferError, TransferOutcome, transfer},
        savings_page::SavingsState,
    },
    timezone::get_local_date,
};

/// The form data for a savings transfer.
#[derive(Debug, Deserialize)]
pub struct SavingsForm {
    /// The raw amount text, blank counts as zero.
    #[serde(default)]
    pub amount: String,
    pub action: SavingsAction,
}

fn success_message(outcome: &TransferOutcome, currency_symbol: &str) -> String {
    let amount = format_currency(currency_symbol, outcome.amount);

    match outcome.action {
        SavingsAction::Deposit => format!("Successfully deposited {amount}!"),
        SavingsAction::Withdraw => format!("Successfully transferred back {amount}!"),
    }
}

fn rejection_message(error: TransferError, currency_symbol: &str) -> String {
    match error {
        TransferError::NonPositiveAmount => "Please enter an amount greater than zero.".to_owned(),
        TransferError::InsufficientBalance => {
            "Oops! Insufficient balance to deposit this amount.".to_owned()
        }
        TransferError::InsufficientSavings { available } => format!(
            "Oops! You only have {} in savings.",
            format_currency(currency_symbol, available)
        ),
    }
}

/// A route handler for savings transfers, redirects back to the savings page with
/// a notice describing the outcome.
pub async fn update_savings_endpoint(
    State(state): State<SavingsState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
    Form(form): Form<SavingsForm>,
) -> Response {
    let Some(amount) = parse_amount(&form.amount) else {
        return redirect_with_notice(jar, endpoints::SAVINGS, Notice::error(INVALID_AMOUNT_MSG));
    };

    let Some(today) = get_local_date(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    let currency_symbol = match get_user_by_id(user_id, &connection) {
        Ok(user) => user.currency_symbol,
        Err(error) => return error.into_response(),
    };

    let notice = match transfer(user_id, form.action, amount, today, &connection) {
        Ok(outcome) => {
            tracing::info!(
                "User {user_id} moved {} ({:?}), savings now {}",
                outcome.amount,
                outcome.action,
                outcome.savings_total
            );
            Notice::success(success_message(&outcome, &currency_symbol))
        }
        Err(Error::Transfer(error)) => {
            tracing::debug!("Rejected savings transfer for user {user_id}: {error}");
            Notice::error(rejection_message(error, &currency_symbol))
        }
        Err(error) => {
            tracing::error!("could not update savings: {error}");
            return error.into_response();
        }
    };

    redirect_with_notice(jar, endpoints::SAVINGS, notice)
}

#[cfg(test)]
mod update_savings_tests {
    use axum::{Extension, extract::FromRef, extract::State, response::IntoResponse};
    use axum_extra::extract::{Form, PrivateCookieJar};
    use time::macros::date;

    use crate::{
        AppState, UserID, endpoints,
        savings::{
            SavingsAction,
            core::{TransferError, TransferOutcome, get_savings_total},
            savings_page::SavingsState,
        },
        test_utils::{assert_redirect, get_test_state, register_test_user},
        transaction::{NewTransaction, TransactionKind, create_transaction},
    };

    use super::{SavingsForm, rejection_message, success_message, update_savings_endpoint};

    fn add_income(state: &AppState, user_id: UserID, amount: f64) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            NewTransaction {
                user_id,
                name: "Pay".to_owned(),
                amount,
                category: "Salary".to_owned(),
                date: date!(2025 - 10 - 01),
                kind: TransactionKind::Income,
            },
            &connection,
        )
        .unwrap();
    }

    async fn post_transfer(
        state: &AppState,
        user_id: UserID,
        amount: &str,
        action: SavingsAction,
    ) -> axum::response::Response {
        update_savings_endpoint(
            State(SavingsState::from_ref(state)),
            Extension(user_id),
            PrivateCookieJar::new(state.cookie_key.clone()),
            Form(SavingsForm {
                amount: amount.to_owned(),
                action,
            }),
        )
        .await
        .into_response()
    }

    #[tokio::test]
    async fn deposit_redirects_to_savings_page() {
        let state = get_test_state();
        let user = register_test_user(&state, "foo@bar.baz", "correcthorse");
        add_income(&state, user.id, 1000.0);

        let response = post_transfer(&state, user.id, "500", SavingsAction::Deposit).await;

        assert_redirect(&response, endpoints::SAVINGS);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_savings_total(user.id, &connection), Ok(500.0));
    }

    #[tokio::test]
    async fn invalid_amount_changes_nothing() {
        let state = get_test_state();
        let user = register_test_user(&state, "foo@bar.baz", "correcthorse");
        add_income(&state, user.id, 1000.0);

        let response = post_transfer(&state, user.id, "lots", SavingsAction::Deposit).await;

        assert_redirect(&response, endpoints::SAVINGS);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_savings_total(user.id, &connection), Ok(0.0));
    }

    #[tokio::test]
    async fn blank_amount_is_rejected() {
        let state = get_test_state();
        let user = register_test_user(&state, "foo@bar.baz", "correcthorse");
        add_income(&state, user.id, 1000.0);

        let response = post_transfer(&state, user.id, "", SavingsAction::Deposit).await;

        assert_redirect(&response, endpoints::SAVINGS);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_savings_total(user.id, &connection), Ok(0.0));
    }

    #[test]
    fn success_messages_include_formatted_amount() {
        let deposit = TransferOutcome {
            action: SavingsAction::Deposit,
            amount: 1500.0,
            savings_total: 1500.0,
        };
        let withdraw = TransferOutcome {
            action: SavingsAction::Withdraw,
            amount: 20.5,
            savings_total: 1479.5,
        };

        assert_eq!(
            success_message(&deposit, "$"),
            "Successfully deposited $1,500.00!"
        );
        assert_eq!(
            success_message(&withdraw, "₱"),
            "Successfully transferred back ₱20.50!"
        );
    }

    #[test]
    fn rejection_messages() {
        assert_eq!(
            rejection_message(TransferError::NonPositiveAmount, "₱"),
            "Please enter an amount greater than zero."
        );
        assert_eq!(
            rejection_message(TransferError::InsufficientBalance, "₱"),
            "Oops! Insufficient balance to deposit this amount."
        );
        assert_eq!(
            rejection_message(
                TransferError::InsufficientSavings { available: 500.0 },
                "₱"
            ),
            "Oops! You only have ₱500.00 in savings."
        );
    }
}
