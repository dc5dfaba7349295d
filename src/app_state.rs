//! Implements a struct that holds the state of the web server.

use std::time::Duration as StdDuration;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{auth::DEFAULT_COOKIE_DURATION, expense::InFlightMutations};

/// The default time to wait for the expense backend before giving up.
pub const DEFAULT_REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// How long the session cookie lasts before the browser discards it.
    pub cookie_duration: Duration,

    /// The shared HTTP client for talking to the expense backend.
    pub http_client: reqwest::Client,

    /// The base URL of the expense backend, e.g. "http://localhost:3000".
    pub api_url: String,

    /// Expense IDs with an update or delete waiting on the backend.
    pub in_flight: InFlightMutations,
}

impl AppState {
    /// Create a new [AppState] for a backend at `api_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built, e.g. when the TLS
    /// backend fails to initialise.
    pub fn new(
        cookie_secret: &str,
        api_url: &str,
        request_timeout: StdDuration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            http_client,
            api_url: api_url.trim_end_matches('/').to_owned(),
            in_flight: InFlightMutations::default(),
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
