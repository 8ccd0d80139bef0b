//! The settings page for viewing and updating the user's profile.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    auth::{
        DEFAULT_CURRENCY_SYMBOL, MAX_CURRENCY_SYMBOL_LENGTH, User, get_user_by_id,
        name_or_default, update_profile,
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, app_page, labelled_input},
    notice::{Notice, redirect_with_notice, take_notice},
};

pub const SETTINGS_UPDATED_MSG: &str = "Settings updated successfully!";
pub const DUPLICATE_EMAIL_MSG: &str = "Email already exists";
pub const MISSING_EMAIL_MSG: &str = "Please enter an email address.";

/// The state needed for the settings page.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<SettingsState> for Key {
    fn from_ref(state: &SettingsState) -> Self {
        state.cookie_key.clone()
    }
}

fn settings_form(user: &User) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::SETTINGS)
            class=(FORM_CONTAINER_STYLE)
        {
            (labelled_input("Display name", "name", "text", &user.name, false))
            (labelled_input("Email", "email", "email", &user.email, true))
            (labelled_input("Currency symbol", "currency", "text", &user.currency_symbol, false))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }
        }
    }
}

/// Display the profile form filled with the user's current details.
pub async fn get_settings_page(
    State(state): State<SettingsState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
) -> Response {
    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_user_by_id(user_id, &connection) {
            Ok(user) => user,
            Err(error) => return error.into_response(),
        }
    };

    let (jar, notice) = take_notice(jar);

    (
        jar,
        app_page(
            "Settings",
            endpoints::SETTINGS,
            notice.as_ref(),
            &settings_form(&user),
        ),
    )
        .into_response()
}

/// The data entered by the user in the settings form.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub currency: String,
}

/// The cleaned profile fields ready to be saved.
#[derive(Debug, PartialEq)]
struct Profile<'a> {
    name: &'a str,
    email: &'a str,
    currency_symbol: &'a str,
}

impl SettingsForm {
    /// Apply the defaults for blank fields and check the rest.
    ///
    /// # Errors
    /// Returns the message to show the user if a field is invalid.
    fn to_profile(&self) -> Result<Profile<'_>, String> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(MISSING_EMAIL_MSG.to_owned());
        }

        let currency_symbol = match self.currency.trim() {
            "" => DEFAULT_CURRENCY_SYMBOL,
            symbol if symbol.chars().count() > MAX_CURRENCY_SYMBOL_LENGTH => {
                return Err(format!(
                    "The currency symbol must be at most {MAX_CURRENCY_SYMBOL_LENGTH} characters."
                ));
            }
            symbol => symbol,
        };

        Ok(Profile {
            name: name_or_default(&self.name),
            email,
            currency_symbol,
        })
    }
}

/// Save the user's profile and go back to the settings page with a notice.
pub async fn update_settings(
    State(state): State<SettingsState>,
    Extension(user_id): Extension<UserID>,
    jar: PrivateCookieJar,
    Form(form): Form<SettingsForm>,
) -> Response {
    let profile = match form.to_profile() {
        Ok(profile) => profile,
        Err(message) => {
            return redirect_with_notice(jar, endpoints::SETTINGS, Notice::error(message));
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_profile(
        user_id,
        profile.name,
        profile.email,
        profile.currency_symbol,
        &connection,
    ) {
        Ok(()) => {
            tracing::info!("Updated profile for user {user_id}");
            redirect_with_notice(
                jar,
                endpoints::SETTINGS,
                Notice::success(SETTINGS_UPDATED_MSG),
            )
        }
        Err(Error::DuplicateEmail) => {
            redirect_with_notice(jar, endpoints::SETTINGS, Notice::error(DUPLICATE_EMAIL_MSG))
        }
        Err(error) => {
            tracing::error!("could not update profile for user {user_id}: {error}");
            error.into_response()
        }
    }
}
