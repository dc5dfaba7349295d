//! Log-out route handler that deletes the token cookie and redirects to the log-in page.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::cookie::invalidate_token_cookie, endpoints};

/// Invalidate the token cookie and redirect the client to the log-in page.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    tracing::info!("Logging out");
    let jar = invalidate_token_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}

#[cfg(test)]
mod log_out_tests {
    use axum::http::{StatusCode, header::SET_COOKIE};
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::{
        auth::cookie::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, set_token_cookie},
        endpoints,
        session::SessionToken,
    };

    use super::get_log_out;

    #[tokio::test]
    async fn log_out_invalidates_token_cookie_and_redirects() {
        let key = Key::from(&Sha512::digest("42"));
        let jar = set_token_cookie(
            PrivateCookieJar::new(key),
            &SessionToken::new("abc123"),
            DEFAULT_COOKIE_DURATION,
        );

        let response = get_log_out(jar).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::LOG_IN_VIEW
        );

        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|header| Cookie::parse(header.to_str().unwrap()).unwrap())
            .find(|cookie| cookie.name() == COOKIE_TOKEN)
            .expect("No token cookie set");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
    }
}
