//! Registration, log-in and session handling.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod redirect;
mod register;
mod token;
mod user;

pub use cookie::{DEFAULT_COOKIE_DURATION, set_auth_cookie};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::auth_guard;
pub use password::{PasswordHash, ValidatedPassword};
pub use register::{get_register_page, register_user};
pub use user::{
    DEFAULT_CURRENCY_SYMBOL, MAX_CURRENCY_SYMBOL_LENGTH, User, UserID, create_user,
    create_user_table, get_user_by_id, name_or_default, update_profile,
};
