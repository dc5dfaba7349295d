//! Authentication middleware that checks for a token cookie and redirects to the log-in page.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;

use crate::{
    auth::{
        cookie::get_token_from_cookies,
        redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target},
    },
    endpoints,
};

/// Only checks that a token is present.
///
/// Whether the token is still valid is up to the backend, which answers 401
/// otherwise and triggers the session expiry flow in the API client.
#[inline]
async fn auth_guard_internal(
    key: Key,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let jar = PrivateCookieJar::from_headers(request.headers(), key);

    if get_token_from_cookies(&jar).is_some() {
        return next.run(request).await;
    }

    let log_in_redirect_url = build_log_in_redirect_url(&request).unwrap_or_else(|| {
        tracing::warn!("No page to return to after log-in. Falling back to expenses.");

        build_log_in_redirect_url_from_target(endpoints::EXPENSES_VIEW)
            .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
    });

    get_redirect(&log_in_redirect_url)
}

/// Middleware function that checks for a token cookie.
/// The request is executed normally if the cookie is present, otherwise a redirect to the log-in page is returned.
///
/// **Note**: The app state must contain an `axum_extra::extract::cookie::Key` for decrypting the cookie contents.
pub async fn auth_guard(State(key): State<Key>, request: Request, next: Next) -> Response {
    auth_guard_internal(key, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Middleware function that checks for a token cookie.
/// The request is executed normally if the cookie is present, otherwise a HTMX redirect to the log-in page is returned.
///
/// **Note**: The app state must contain an `axum_extra::extract::cookie::Key` for decrypting the cookie contents.
pub async fn auth_guard_hx(State(key): State<Key>, request: Request, next: Next) -> Response {
    auth_guard_internal(key, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
