use axum::response::IntoResponse;
use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use rusqlite::Connection;

use crate::{
    AppState, PasswordHash, User, ValidatedPassword,
    auth::{DEFAULT_COOKIE_DURATION, UserID, create_user, set_auth_cookie},
};

/// An app state backed by an in-memory database with a fast password hash cost.
pub(crate) fn get_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let mut state = AppState::new(connection, "foobar", "Etc/UTC").expect("Could not create state");
    state.password_cost = 4;

    state
}

pub(crate) fn register_test_user(state: &AppState, email: &str, password: &str) -> User {
    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked(password),
        state.password_cost,
    )
    .expect("Could not hash password");
    let connection = state.db_connection.lock().unwrap();

    create_user(email, "Test User", password_hash, &connection).expect("Could not create user")
}

/// The encrypted auth cookie for `user_id`, as the browser would send it.
pub(crate) fn log_in_cookie(state: &AppState, user_id: UserID) -> Cookie<'static> {
    let jar = set_auth_cookie(
        PrivateCookieJar::new(state.cookie_key.clone()),
        user_id,
        DEFAULT_COOKIE_DURATION,
    )
    .expect("Could not set auth cookie");
    let response = jar.into_response();
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("No set-cookie header")
        .to_str()
        .unwrap()
        .to_owned();

    Cookie::parse(set_cookie).expect("Could not parse auth cookie")
}
