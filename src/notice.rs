//! One-shot notices for reporting the outcome of a form submission.
//!
//! A mutating route stores a [Notice] in a private cookie and redirects. The
//! next page render takes the notice out of the cookie jar and displays it once.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

pub(crate) const COOKIE_NOTICE: &str = "notice";

/// Notice types for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message to show the user on the next page they visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Store `notice` in `jar` so that it is shown on the next page render.
///
/// If the notice cannot be serialized the jar is returned unchanged and the
/// error is logged.
pub fn set_notice(jar: PrivateCookieJar, notice: &Notice) -> PrivateCookieJar {
    match serde_json::to_string(notice) {
        Ok(value) => jar.add(
            Cookie::build((COOKIE_NOTICE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(true),
        ),
        Err(error) => {
            tracing::error!("Could not serialize notice {notice:?}: {error}");
            jar
        }
    }
}

/// Remove the pending notice from `jar`, if any, and return it.
///
/// A cookie that does not hold a valid notice is discarded.
pub fn take_notice(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(COOKIE_NOTICE) else {
        return (jar, None);
    };

    let notice = match serde_json::from_str(cookie.value_trimmed()) {
        Ok(notice) => Some(notice),
        Err(error) => {
            tracing::warn!("Discarding invalid notice cookie: {error}");
            None
        }
    };

    let jar = jar.remove(Cookie::build((COOKIE_NOTICE, "")).path("/"));

    (jar, notice)
}

/// Redirect the client to `location` with `notice` queued for display.
pub fn redirect_with_notice(jar: PrivateCookieJar, location: &str, notice: Notice) -> Response {
    (set_notice(jar, &notice), Redirect::to(location)).into_response()
}

/// Renders the notice, or nothing if there is no notice.
pub fn notice_view(notice: Option<&Notice>) -> Markup {
    let Some(notice) = notice else {
        return html!();
    };

    let (level, style) = match notice.level {
        NoticeLevel::Success => (
            "success",
            "p-4 text-sm rounded-lg text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400",
        ),
        NoticeLevel::Error => (
            "error",
            "p-4 text-sm rounded-lg text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400",
        ),
    };

    html! {
        div id="notice" role="alert" class=(style) data-level=(level)
        {
            (notice.message)
        }
    }
}
