#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod state;

pub(crate) use form::{assert_form_input, assert_form_submit_button, must_get_form_by_action};
pub(crate) use html::{assert_valid_html, parse_html_document, select_text};
pub(crate) use http::{assert_content_type, assert_redirect};
pub(crate) use state::{get_test_state, log_in_cookie, register_test_user};
