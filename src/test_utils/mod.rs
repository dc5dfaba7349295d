#![allow(missing_docs)]

pub(crate) mod backend;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use backend::{
    MockBackend, TEST_COOKIE_SECRET, TEST_PASSWORD, TEST_TOKEN, encrypted_cookie,
    session_cookie, test_app_state, test_expense, test_server, test_server_with_state,
};
pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button,
    assert_form_submit_button_with_text, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_hx_redirects_to_log_in, assert_redirects_to_log_in};
