//! The financial summary shown at the top of most pages.

use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    Error, UserID,
    auth::get_user_by_id,
    html::{format_currency, stat_card},
    savings::get_savings_total,
    transaction::{TransactionKind, sum_transactions},
};

/// A user's profile and money figures, derived from the stored rows on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub name: String,
    pub email: String,
    pub currency_symbol: String,
    pub total_income: f64,
    pub total_expense: f64,
    /// Total income minus total expense.
    pub balance: f64,
    pub savings: f64,
}

/// Compute the [Snapshot] for the user.
///
/// # Errors
/// This function will return a [Error::NotFound] if the user does not exist or a
/// [Error::SqlError] if there is some other SQL error.
pub fn get_snapshot(user_id: UserID, connection: &Connection) -> Result<Snapshot, Error> {
    let user = get_user_by_id(user_id, connection)?;
    let total_income = sum_transactions(user_id, TransactionKind::Income, connection)?;
    let total_expense = sum_transactions(user_id, TransactionKind::Expense, connection)?;
    let savings = get_savings_total(user_id, connection)?;

    Ok(Snapshot {
        name: user.name,
        email: user.email,
        currency_symbol: user.currency_symbol,
        total_income,
        total_expense,
        balance: total_income - total_expense,
        savings,
    })
}

impl Snapshot {
    /// Format `amount` with the user's currency symbol.
    pub fn currency(&self, amount: f64) -> String {
        format_currency(&self.currency_symbol, amount)
    }
}

/// The row of cards with the balance, income, expense and savings figures.
pub fn snapshot_cards(snapshot: &Snapshot) -> Markup {
    html! {
        section id="snapshot" class="flex flex-wrap gap-4 w-full"
        {
            (stat_card("Balance", &snapshot.currency(snapshot.balance)))
            (stat_card("Income", &snapshot.currency(snapshot.total_income)))
            (stat_card("Expenses", &snapshot.currency(snapshot.total_expense)))
            (stat_card("Savings", &snapshot.currency(snapshot.savings)))
        }
    }
}
