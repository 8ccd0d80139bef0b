//! Helpers for sending the user back to the page they asked for after logging in.

use axum::http::Uri;

use crate::endpoints;

fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(redirect_url);

    path != endpoints::LOG_IN && path != endpoints::LOG_OUT
}

/// Reduce `raw_url` to a path and query on this site, or `None` if it points elsewhere.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// The log-in URL that returns the user to `redirect_target` afterwards.
///
/// Falls back to the plain log-in URL if `redirect_target` is not a safe redirect.
pub fn build_log_in_redirect_url(redirect_target: &str) -> String {
    match normalize_redirect_url(redirect_target) {
        Some(target) => {
            match serde_urlencoded::to_string([("redirect_url", target.as_str())]) {
                Ok(param) => format!("{}?{}", endpoints::LOG_IN, param),
                Err(error) => {
                    tracing::error!("Could not encode redirect URL {target}: {error}");
                    endpoints::LOG_IN.to_owned()
                }
            }
        }
        None => endpoints::LOG_IN.to_owned(),
    }
}

#[cfg(test)]
mod redirect_tests {
    use super::{build_log_in_redirect_url, normalize_redirect_url};

    #[test]
    fn keeps_local_path_and_query() {
        assert_eq!(
            normalize_redirect_url("/transactions?page=2"),
            Some("/transactions?page=2".to_owned())
        );
    }

    #[test]
    fn rejects_other_sites() {
        assert_eq!(normalize_redirect_url("https://evil.example/wallet"), None);
        assert_eq!(normalize_redirect_url("//evil.example/wallet"), None);
        assert_eq!(normalize_redirect_url("wallet"), None);
    }

    #[test]
    fn rejects_log_in_and_log_out() {
        assert_eq!(normalize_redirect_url("/login?redirect_url=%2F"), None);
        assert_eq!(normalize_redirect_url("/logout"), None);
    }

    #[test]
    fn builds_log_in_url_with_encoded_target() {
        assert_eq!(
            build_log_in_redirect_url("/savings"),
            "/login?redirect_url=%2Fsavings"
        );
        assert_eq!(build_log_in_redirect_url("/"), "/login?redirect_url=%2F");
    }

    #[test]
    fn unsafe_target_is_dropped() {
        assert_eq!(build_log_in_redirect_url("https://evil.example"), "/login");
    }
}
