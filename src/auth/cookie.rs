//! Defines functions for keeping the session token and flash notices in cookies.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{alert::Alert, session::SessionToken};

pub(crate) const COOKIE_TOKEN: &str = "token";
pub(crate) const COOKIE_FLASH: &str = "flash";
/// The default duration for which the token cookie is kept by the browser.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::days(30);

fn build_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build()
}

fn expired_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = build_cookie(name, "deleted".to_owned());
    cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
    cookie.set_max_age(Duration::ZERO);

    cookie
}

/// Add the token cookie to the cookie jar, marking the browser as logged in.
///
/// The cookie expires `duration` from now. The backend decides whether the
/// token itself is still valid.
pub(crate) fn set_token_cookie(
    jar: PrivateCookieJar,
    token: &SessionToken,
    duration: Duration,
) -> PrivateCookieJar {
    let mut cookie = build_cookie(COOKIE_TOKEN, token.as_str().to_owned());
    cookie.set_expires(OffsetDateTime::now_utc() + duration);

    jar.add(cookie)
}

/// Set the token cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub(crate) fn invalidate_token_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(expired_cookie(COOKIE_TOKEN))
}

/// Read the session token from the cookie jar.
///
/// Returns `None` when the cookie is missing, could not be decrypted, or is
/// empty.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Option<SessionToken> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| cookie.value_trimmed().to_owned())
        .filter(|token| !token.is_empty())
        .map(SessionToken::new)
}

/// Store `alert` so that the next full page load can show it.
pub(crate) fn set_flash_cookie(jar: PrivateCookieJar, alert: &Alert) -> PrivateCookieJar {
    match serde_json::to_string(alert) {
        Ok(value) => jar.add(build_cookie(COOKIE_FLASH, value)),
        Err(error) => {
            tracing::error!("Could not serialize flash alert: {error}");
            jar
        }
    }
}

/// Remove the flash notice from the cookie jar and return it.
///
/// A flash cookie that cannot be decoded is discarded.
pub(crate) fn take_flash_cookie(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Alert>) {
    let Some(cookie) = jar.get(COOKIE_FLASH) else {
        return (jar, None);
    };

    let alert = match serde_json::from_str(cookie.value()) {
        Ok(alert) => Some(alert),
        Err(error) => {
            tracing::warn!("Discarding invalid flash cookie: {error}");
            None
        }
    };

    (jar.add(expired_cookie(COOKIE_FLASH)), alert)
}
