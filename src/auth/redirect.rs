//! Helpers for remembering where to send the user after logging in.

use axum::{
    extract::Request,
    http::{HeaderMap, Uri},
};
use tracing::{error, warn};

use crate::endpoints;

fn is_safe_redirect_url(redirect_url: &str) -> bool {
    if !redirect_url.starts_with('/') || redirect_url.starts_with("//") {
        return false;
    }

    let path = redirect_url
        .split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(redirect_url);

    path != endpoints::LOG_IN_VIEW && path != endpoints::REGISTER_VIEW
}

/// Accept `raw_url` as a redirect target only if it is a local path.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

fn normalize_hx_current_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;
    let path_and_query = uri.path_and_query()?.as_str();

    is_safe_redirect_url(path_and_query).then(|| path_and_query.to_owned())
}

/// The page the user should return to after logging in.
///
/// For htmx requests this is the page the request came from, since the
/// requested URL is only a fragment or an API call. Otherwise it is the
/// requested URL itself. Non-htmx `/api` requests have no page to return to.
pub fn redirect_target(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    if is_htmx_request(headers) {
        redirect_target_from_hx_current_url(headers)
    } else if uri.path().starts_with("/api") {
        warn!("Missing HX-Request header for /api request.");
        None
    } else {
        normalize_redirect_url(uri.path_and_query()?.as_str())
    }
}

/// Whether the request was made by htmx rather than a full page load.
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|header| header.to_str().ok())
        .is_some_and(|header| header.eq_ignore_ascii_case("true"))
}

/// Build the log-in URL for `request` with a `redirect_url` query parameter.
pub fn build_log_in_redirect_url(request: &Request) -> Option<String> {
    let redirect_target = redirect_target(request.headers(), request.uri())?;

    build_log_in_redirect_url_from_target(&redirect_target)
}

pub fn build_log_in_redirect_url_from_target(redirect_target: &str) -> Option<String> {
    match serde_urlencoded::to_string([("redirect_url", redirect_target)]) {
        Ok(param) => Some(format!("{}?{}", endpoints::LOG_IN_VIEW, param)),
        Err(error) => {
            error!("Could not encode redirect URL {redirect_target}: {error}");
            None
        }
    }
}

fn redirect_target_from_hx_current_url(headers: &HeaderMap) -> Option<String> {
    let current_url = match headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())
    {
        Some(value) => value,
        None => {
            warn!("Missing HX-Current-URL header for htmx request.");
            return None;
        }
    };

    let redirect_url = normalize_hx_current_url(current_url);
    if redirect_url.is_none() {
        warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    redirect_url
}
