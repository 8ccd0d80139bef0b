//! Transaction management for the finance application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionKind`
//! - Database functions for storing, summing and deleting transactions
//! - View handlers for transaction-related web pages

mod core;
mod create_endpoint;
mod transactions_page;
mod view;

pub use core::{
    NewTransaction, TransactionKind, create_transaction, create_transaction_table,
    get_transactions, sum_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use transactions_page::{clear_history_endpoint, get_transactions_page};
pub use view::{new_transaction_form, transaction_table};
