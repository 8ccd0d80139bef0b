//! Wallet accounts: named balances such as bank accounts, e-wallets and cash,
//! adjusted by hand and kept apart from the transaction ledger.

mod adjust_endpoint;
mod core;
mod create_endpoint;
mod wallet_page;

pub use adjust_endpoint::adjust_account_endpoint;
pub use core::{NewAccount, create_account, create_account_table};
pub use create_endpoint::create_account_endpoint;
pub use wallet_page::get_wallet_page;
