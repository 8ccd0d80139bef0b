//! Expense totals grouped by category, shown on the dashboard, budget and analytics pages.

use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    Error, UserID,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
};

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Sum the user's expenses per category, largest total first.
///
/// Ties are broken by category name so the order is stable.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_expense_breakdown(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(amount) AS total FROM \"transaction\"
             WHERE user_id = ?1 AND type = 'Expense'
             GROUP BY category
             ORDER BY total DESC, category ASC",
        )?
        .query_map((user_id,), |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(Error::from))
        .collect()
}

/// The share of `total` out of `grand_total` as a percentage, zero when there is nothing spent.
pub fn percentage_share(total: f64, grand_total: f64) -> f64 {
    if grand_total <= 0.0 {
        0.0
    } else {
        total / grand_total * 100.0
    }
}

/// A table of category totals with each category's share of all expenses.
pub fn expense_breakdown_view(breakdown: &[CategoryTotal], currency_symbol: &str) -> Markup {
    let grand_total: f64 = breakdown.iter().map(|row| row.total).sum();

    html! {
        section class="w-full"
        {
            h2 class="mb-2 text-lg font-semibold" { "Expenses by category" }

            div class="relative overflow-x-auto shadow-md sm:rounded-lg"
            {
                table id="expense-breakdown" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Spent" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Share" }
                        }
                    }

                    tbody
                    {
                        @for row in breakdown {
                            @let share = percentage_share(row.total, grand_total);

                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
                                {
                                    (row.category)
                                }
                                td class={ (TABLE_CELL_STYLE) " text-right" }
                                {
                                    (format_currency(currency_symbol, row.total))
                                }
                                td class={ (TABLE_CELL_STYLE) " text-right" }
                                {
                                    div class="flex items-center justify-end gap-2"
                                    {
                                        div class="w-24 h-2 bg-gray-200 rounded dark:bg-gray-700"
                                        {
                                            div
                                                class="h-2 bg-blue-600 rounded"
                                                style={ "width: " (format!("{share:.0}")) "%" } {}
                                        }
                                        span class="share" { (format!("{share:.1}%")) }
                                    }
                                }
                            }
                        }

                        @if breakdown.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="3" class={ (TABLE_CELL_STYLE) " text-center" }
                                {
                                    "No expenses recorded."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
