use axum_test::TestResponse;

use crate::endpoints;

#[track_caller]
fn header_text(response: &TestResponse, header_name: &str) -> String {
    response
        .maybe_header(header_name)
        .unwrap_or_else(|| panic!("Headers missing {header_name}"))
        .to_str()
        .expect("Could not convert to str")
        .to_owned()
}

/// Assert that a full page load was sent to the log-in page, with or without
/// a `redirect_url` back to where it came from.
#[track_caller]
pub(crate) fn assert_redirects_to_log_in(response: &TestResponse) {
    response.assert_status_see_other();
    let location = header_text(response, "location");
    assert!(
        location.starts_with(endpoints::LOG_IN_VIEW),
        "expected a redirect to {}, got {location}",
        endpoints::LOG_IN_VIEW
    );
}

/// Like [assert_redirects_to_log_in], but for htmx requests.
#[track_caller]
pub(crate) fn assert_hx_redirects_to_log_in(response: &TestResponse) {
    let location = header_text(response, "hx-redirect");
    assert!(
        location.starts_with(endpoints::LOG_IN_VIEW),
        "expected an htmx redirect to {}, got {location}",
        endpoints::LOG_IN_VIEW
    );
}
