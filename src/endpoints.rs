//! The endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/adjust_account/{account_id}', use [format_endpoint].

/// The dashboard, the landing page for logged in users.
pub const ROOT: &str = "/";
/// The log-in page and the route the log-in form posts to.
pub const LOG_IN: &str = "/login";
/// The registration page and the route the registration form posts to.
pub const REGISTER: &str = "/register";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/logout";
/// The page for viewing and updating the user's profile.
pub const SETTINGS: &str = "/settings";
/// The page for listing the user's accounts.
pub const WALLET: &str = "/wallet";
/// The page for displaying expenses grouped by category.
pub const BUDGET: &str = "/budget";
/// The page for displaying income and expense analytics.
pub const ANALYTICS: &str = "/analytics";
/// The page for moving money in and out of savings.
pub const SAVINGS: &str = "/savings";
/// The page for displaying a user's transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to create an account.
pub const ADD_ACCOUNT: &str = "/add_account";
/// The route to increase or decrease an account's balance.
pub const ADJUST_ACCOUNT: &str = "/adjust_account/{account_id}";
/// The route to record a transaction.
pub const ADD_TRANSACTION: &str = "/add_transaction";
/// The route to deposit into or withdraw from savings.
pub const UPDATE_SAVINGS: &str = "/update_savings";
/// The route that deletes all of the user's transactions.
pub const CLEAR_HISTORY: &str = "/clear_history";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
