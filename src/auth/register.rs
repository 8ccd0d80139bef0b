//! The registration page for creating a new account.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, PasswordHash,
    auth::user::create_user,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, base, labelled_input, log_in_register},
    notice::{Notice, notice_view, redirect_with_notice, take_notice},
};

pub const DUPLICATE_EMAIL_MSG: &str = "Email already exists";
pub const ACCOUNT_CREATED_MSG: &str = "Account created! Please login.";

/// The state needed to register a user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    pub cookie_key: Key,
    /// The bcrypt cost for hashing the new user's password.
    pub password_cost: u32,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            password_cost: state.password_cost,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

fn registration_form() -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::REGISTER)
            class="space-y-4 md:space-y-6"
        {
            (labelled_input("Name", "name", "text", "", false))
            (labelled_input("Email", "email", "email", "", true))
            (labelled_input("Password", "password", "password", "", true))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create account" }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                a href=(endpoints::LOG_IN) class=(LINK_STYLE) { "Log in here" }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page(jar: PrivateCookieJar) -> Response {
    let (jar, notice) = take_notice(jar);
    let content = log_in_register(
        "Create an account",
        &notice_view(notice.as_ref()),
        &registration_form(),
    );

    (jar, base("Register", &content)).into_response()
}

/// The data entered by the user in the registration form.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    /// Blank names are replaced with the default name.
    #[serde(default)]
    pub name: String,
    pub password: String,
}

/// Create a user and their savings record, then send the client to the log-in page.
///
/// Weak passwords and emails that are already registered send the client back
/// to the registration page with a notice.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let password_hash = match PasswordHash::from_raw_password(&form.password, state.password_cost)
    {
        Ok(password_hash) => password_hash,
        Err(Error::TooWeak(reason)) => {
            return redirect_with_notice(jar, endpoints::REGISTER, Notice::error(reason));
        }
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_user(&form.email, &form.name, password_hash, &connection) {
        Ok(user) => {
            tracing::info!("Registered user {}", user.id);
            redirect_with_notice(jar, endpoints::LOG_IN, Notice::success(ACCOUNT_CREATED_MSG))
        }
        Err(Error::DuplicateEmail) => {
            redirect_with_notice(jar, endpoints::REGISTER, Notice::error(DUPLICATE_EMAIL_MSG))
        }
        Err(error) => error.into_response(),
    }
}
