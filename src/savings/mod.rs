//! The savings balance: a running total kept apart from the transaction-derived
//! balance, and the transfers between the two.

mod core;
mod savings_page;
mod update_endpoint;

pub use core::{
    SavingsAction, TransferError, TransferOutcome, create_savings_record, create_savings_table,
    get_savings_total, transfer,
};
pub use savings_page::get_savings_page;
pub use update_endpoint::update_savings_endpoint;
