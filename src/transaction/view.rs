//! HTML views shared by the pages that list transactions.

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, labelled_input,
    },
    transaction::core::{Transaction, TransactionKind},
};

/// The signed, formatted amount: income is shown with "+" and expenses with "-".
pub fn signed_amount(transaction: &Transaction, currency_symbol: &str) -> String {
    let sign = match transaction.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };

    format!("{sign}{}", format_currency(currency_symbol, transaction.amount))
}

/// A table of `transactions` in the order given.
pub fn transaction_table(transactions: &[Transaction], currency_symbol: &str) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md sm:rounded-lg w-full"
        {
            table id="transactions" class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE) data-type=(transaction.kind)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            th scope="row" class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
                            {
                                (transaction.name)
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.category) }
                            td class=(TABLE_CELL_STYLE) { (transaction.kind) }
                            td class={ (TABLE_CELL_STYLE) " text-right font-semibold" }
                            {
                                (signed_amount(transaction, currency_symbol))
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                "No transactions yet."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The form for recording a new transaction, with the date prefilled to `today`.
pub fn new_transaction_form(today: Date) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::ADD_TRANSACTION)
            class={ (CARD_STYLE) " space-y-4" }
        {
            h2 class="text-lg font-semibold" { "Add transaction" }

            (labelled_input("Name", "name", "text", "", true))

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                input
                    type="number"
                    name="amount"
                    id="amount"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (labelled_input("Category", "category", "text", "", true))
            (labelled_input("Date", "date", "date", &today.to_string(), false))

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(TransactionKind::Expense) selected { "Expense" }
                    option value=(TransactionKind::Income) { "Income" }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record transaction" }
        }
    }
}
