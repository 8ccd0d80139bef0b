//! The savings record and the transfers between the free balance and savings.

use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use serde::Deserialize;
use time::Date;

use crate::{
    Error, UserID,
    amount::round_to_cents,
    transaction::{NewTransaction, TransactionKind, create_transaction, sum_transactions},
};

/// The name of the transaction recorded when money moves into savings.
pub const DEPOSIT_TRANSACTION_NAME: &str = "Transfer to Savings";
/// The name of the transaction recorded when money moves out of savings.
pub const WITHDRAW_TRANSACTION_NAME: &str = "Withdraw from Savings";
/// The category of the transactions recorded for savings transfers.
pub const TRANSFER_CATEGORY: &str = "Salary";

/// The reasons a savings transfer is rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TransferError {
    /// The amount was zero or negative.
    #[error("the amount must be greater than zero")]
    NonPositiveAmount,

    /// The free balance is not positive or is less than the deposit.
    #[error("the balance is too low for this deposit")]
    InsufficientBalance,

    /// The withdrawal is more than the savings total.
    #[error("only {available} is available in savings")]
    InsufficientSavings {
        /// The savings total at the time of the withdrawal.
        available: f64,
    },
}

/// The direction of a savings transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsAction {
    /// Move money from the free balance into savings.
    Deposit,
    /// Move money from savings back into the free balance.
    Withdraw,
}

/// The result of a successful savings transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferOutcome {
    /// The direction of the transfer.
    pub action: SavingsAction,
    /// The amount that was moved.
    pub amount: f64,
    /// The savings total after the transfer.
    pub savings_total: f64,
}

/// Create the savings table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_savings_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS savings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE,
                total_amount REAL NOT NULL DEFAULT 0.0 CHECK (total_amount >= 0),
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Create the empty savings record for a new user.
///
/// # Errors
/// This function will return a [Error::SqlError] if the user already has a
/// savings record, the user does not exist or there is some other SQL error.
pub fn create_savings_record(user_id: UserID, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO savings (user_id, total_amount) VALUES (?1, 0.0)",
        (user_id,),
    )?;

    Ok(())
}

/// The user's savings total, zero if the user has no savings record.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_savings_total(user_id: UserID, connection: &Connection) -> Result<f64, Error> {
    let total = connection
        .query_row(
            "SELECT total_amount FROM savings WHERE user_id = ?1",
            (user_id,),
            |row| row.get(0),
        )
        .optional()?;

    Ok(total.unwrap_or(0.0))
}

/// Move `amount` between the user's free balance and their savings.
///
/// A deposit requires a positive free balance of at least `amount` and records an
/// expense. A withdrawal requires a savings total of at least `amount` and records
/// an income. Both are dated `today`.
///
/// The checks and writes run in a single immediate SQLite transaction, so a
/// rejected or failed transfer leaves no trace and concurrent transfers cannot
/// both spend the same money.
///
/// # Errors
/// This function will return:
/// - [Error::Transfer] if the transfer breaks one of the rules above,
/// - [Error::NotFound] if the user has no savings record,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn transfer(
    user_id: UserID,
    action: SavingsAction,
    amount: f64,
    today: Date,
    connection: &Connection,
) -> Result<TransferOutcome, Error> {
    if amount.is_nan() || amount <= 0.0 {
        return Err(TransferError::NonPositiveAmount.into());
    }

    let sql_transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let (name, kind, savings_change) = match action {
        SavingsAction::Deposit => {
            let balance = round_to_cents(
                sum_transactions(user_id, TransactionKind::Income, &sql_transaction)?
                    - sum_transactions(user_id, TransactionKind::Expense, &sql_transaction)?,
            );

            if balance <= 0.0 || amount > balance {
                return Err(TransferError::InsufficientBalance.into());
            }

            (DEPOSIT_TRANSACTION_NAME, TransactionKind::Expense, amount)
        }
        SavingsAction::Withdraw => {
            let savings_total = round_to_cents(get_savings_total(user_id, &sql_transaction)?);

            if amount > savings_total {
                return Err(TransferError::InsufficientSavings {
                    available: savings_total,
                }
                .into());
            }

            (WITHDRAW_TRANSACTION_NAME, TransactionKind::Income, -amount)
        }
    };

    let savings_total: f64 = sql_transaction.query_row(
        "UPDATE savings SET total_amount = MAX(0.0, total_amount + ?1) WHERE user_id = ?2
         RETURNING total_amount",
        (savings_change, user_id),
        |row| row.get(0),
    )?;

    create_transaction(
        NewTransaction {
            user_id,
            name: name.to_owned(),
            amount,
            category: TRANSFER_CATEGORY.to_owned(),
            date: today,
            kind,
        },
        &sql_transaction,
    )?;

    sql_transaction.commit()?;

    Ok(TransferOutcome {
        action,
        amount,
        savings_total,
    })
}

#[cfg(test)]
mod savings_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error, PasswordHash, UserID,
        auth::create_user,
        db::initialize,
        transaction::{
            NewTransaction, TransactionKind, create_transaction, get_transactions,
            sum_transactions,
        },
    };

    use crate::amount::round_to_cents;

    use super::{
        SavingsAction, TransferError, TransferOutcome, create_savings_record, get_savings_total,
        transfer,
    };

    fn get_test_connection() -> (Connection, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_user(
            "foo@bar.baz",
            "Foo",
            PasswordHash::new_unchecked("hunter2"),
            &connection,
        )
        .unwrap();

        (connection, user.id)
    }

    fn add_income(user_id: UserID, amount: f64, connection: &Connection) {
        create_transaction(
            NewTransaction {
                user_id,
                name: "Pay".to_owned(),
                amount,
                category: "Salary".to_owned(),
                date: date!(2025 - 10 - 01),
                kind: TransactionKind::Income,
            },
            connection,
        )
        .unwrap();
    }

    fn get_balance(user_id: UserID, connection: &Connection) -> f64 {
        sum_transactions(user_id, TransactionKind::Income, connection).unwrap()
            - sum_transactions(user_id, TransactionKind::Expense, connection).unwrap()
    }

    #[test]
    fn new_user_has_zero_savings() {
        let (connection, user_id) = get_test_connection();

        assert_eq!(get_savings_total(user_id, &connection), Ok(0.0));
    }

    #[test]
    fn missing_record_counts_as_zero() {
        let (connection, _) = get_test_connection();

        assert_eq!(get_savings_total(UserID::new(999), &connection), Ok(0.0));
    }

    #[test]
    fn second_savings_record_is_rejected() {
        let (connection, user_id) = get_test_connection();

        let result = create_savings_record(user_id, &connection);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn deposit_moves_balance_into_savings() {
        let (connection, user_id) = get_test_connection();
        add_income(user_id, 1000.0, &connection);

        let outcome = transfer(
            user_id,
            SavingsAction::Deposit,
            500.0,
            date!(2025 - 10 - 05),
            &connection,
        );

        assert_eq!(
            outcome,
            Ok(TransferOutcome {
                action: SavingsAction::Deposit,
                amount: 500.0,
                savings_total: 500.0
            })
        );
        assert_eq!(get_savings_total(user_id, &connection), Ok(500.0));
        assert_eq!(get_balance(user_id, &connection), 500.0);

        let transactions = get_transactions(user_id, Some(1), &connection).unwrap();
        let recorded = &transactions[0];
        assert_eq!(recorded.name, "Transfer to Savings");
        assert_eq!(recorded.category, "Salary");
        assert_eq!(recorded.kind, TransactionKind::Expense);
        assert_eq!(recorded.date, date!(2025 - 10 - 05));
    }

    #[test]
    fn deposit_of_entire_balance_is_allowed() {
        let (connection, user_id) = get_test_connection();
        add_income(user_id, 250.0, &connection);

        let outcome = transfer(
            user_id,
            SavingsAction::Deposit,
            250.0,
            date!(2025 - 10 - 05),
            &connection,
        )
        .unwrap();

        assert_eq!(outcome.savings_total, 250.0);
        assert_eq!(get_balance(user_id, &connection), 0.0);
    }

    #[test]
    fn deposit_of_displayed_balance_is_allowed() {
        let (connection, user_id) = get_test_connection();
        add_income(user_id, 0.3, &connection);
        create_transaction(
            NewTransaction {
                user_id,
                name: "Candy".to_owned(),
                amount: 0.1,
                category: "Food".to_owned(),
                date: date!(2025 - 10 - 02),
                kind: TransactionKind::Expense,
            },
            &connection,
        )
        .unwrap();

        let outcome = transfer(
            user_id,
            SavingsAction::Deposit,
            0.2,
            date!(2025 - 10 - 05),
            &connection,
        )
        .unwrap();

        assert_eq!(outcome.savings_total, 0.2);
    }

    #[test]
    fn withdraw_of_displayed_savings_is_allowed() {
        let (connection, user_id) = get_test_connection();
        add_income(user_id, 1.0, &connection);
        for amount in [0.1, 0.2] {
            transfer(
                user_id,
                SavingsAction::Deposit,
                amount,
                date!(2025 - 10 - 05),
                &connection,
            )
            .unwrap();
        }

        let outcome = transfer(
            user_id,
            SavingsAction::Withdraw,
            0.3,
            date!(2025 - 10 - 06),
            &connection,
        )
        .unwrap();

        assert_eq!(round_to_cents(outcome.savings_total), 0.0);
        assert!(outcome.savings_total >= 0.0);
    }

    #[test]
    fn deposit_over_balance_is_rejected_without_changes() {
        let (connection, user_id) = get_test_connection();
        add_income(user_id, 100.0, &connection);

        let result = transfer(
            user_id,
            SavingsAction::Deposit,
            100.01,
            date!(2025 - 10 - 05),
            &connection,
        );

        assert_eq!(result, Err(Error::Transfer(TransferError::InsufficientBalance)));
        assert_eq!(get_savings_total(user_id, &connection), Ok(0.0));
        assert_eq!(get_transactions(user_id, None, &connection).unwrap().len(), 1);
    }

    #[test]
    fn deposit_with_empty_balance_is_rejected() {
        let (connection, user_id) = get_test_connection();

        let result = transfer(
            user_id,
            SavingsAction::Deposit,
            1.0,
            date!(2025 - 10 - 05),
            &connection,
        );

        assert_eq!(result, Err(Error::Transfer(TransferError::InsufficientBalance)));
    }

    #[test]
    fn withdraw_moves_savings_into_balance() {
        let (connection, user_id) = get_test_connection();
        add_income(user_id, 1000.0, &connection);
        transfer(
            user_id,
            SavingsAction::Deposit,
            500.0,
            date!(2025 - 10 - 05),
            &connection,
        )
        .unwrap();

        let outcome = transfer(
            user_id,
            SavingsAction::Withdraw,
            200.0,
            date!(2025 - 10 - 06),
            &connection,
        )
        .unwrap();

        assert_eq!(outcome.savings_total, 300.0);
        assert_eq!(get_balance(user_id, &connection), 700.0);
        let transactions = get_transactions(user_id, Some(1), &connection).unwrap();
        assert_eq!(transactions[0].name, "Withdraw from Savings");
        assert_eq!(transactions[0].kind, TransactionKind::Income);
    }

    #[test]
    fn withdraw_over_savings_is_rejected_without_changes() {
        let (connection, user_id) = get_test_connection();
        add_income(user_id, 1000.0, &connection);
        transfer(
            user_id,
            SavingsAction::Deposit,
            500.0,
            date!(2025 - 10 - 05),
            &connection,
        )
        .unwrap();

        let result = transfer(
            user_id,
            SavingsAction::Withdraw,
            600.0,
            date!(2025 - 10 - 06),
            &connection,
        );

        assert_eq!(
            result,
            Err(Error::Transfer(TransferError::InsufficientSavings {
                available: 500.0
            }))
        );
        assert_eq!(get_savings_total(user_id, &connection), Ok(500.0));
        assert_eq!(get_balance(user_id, &connection), 500.0);
        assert_eq!(get_transactions(user_id, None, &connection).unwrap().len(), 2);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let (connection, user_id) = get_test_connection();
        add_income(user_id, 1000.0, &connection);

        for action in [SavingsAction::Deposit, SavingsAction::Withdraw] {
            for amount in [0.0, -5.0, f64::NAN] {
                let result = transfer(user_id, action, amount, date!(2025 - 10 - 05), &connection);

                assert_eq!(
                    result,
                    Err(Error::Transfer(TransferError::NonPositiveAmount)),
                    "{action:?} of {amount} should be rejected"
                );
            }
        }
        assert_eq!(get_savings_total(user_id, &connection), Ok(0.0));
    }

    #[test]
    fn transfers_leave_no_open_transaction() {
        let (connection, user_id) = get_test_connection();

        let _ = transfer(
            user_id,
            SavingsAction::Withdraw,
            10.0,
            date!(2025 - 10 - 05),
            &connection,
        );

        assert!(connection.is_autocommit());
    }
}
