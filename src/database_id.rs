//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// The ID of a wallet account.
pub type AccountId = DatabaseId;
/// The ID of a ledger transaction.
pub type TransactionId = DatabaseId;
