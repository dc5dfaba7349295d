//! The session token holder shared by the API client and the response layer.
//!
//! A [Session] is built per request from the token cookie and handed to the
//! [ApiClient](crate::api::ApiClient). When the backend rejects the token the
//! client clears the session, and anything subscribed to it (the response
//! layer, which then deletes the cookie) observes the change.

use std::{fmt, sync::Arc};

use tokio::sync::watch;

/// An opaque bearer credential issued by the backend at log-in.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap the raw token string returned by the backend.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header or the cookie.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens end up in log lines via `{:?}` on parent structs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(********)")
    }
}

/// Holds at most one [SessionToken] and notifies subscribers when it changes.
///
/// Cloning a session yields a handle to the same underlying token.
#[derive(Debug, Clone)]
pub struct Session {
    sender: Arc<watch::Sender<Option<SessionToken>>>,
}

impl Session {
    /// Create a session, authenticated if `token` is `Some`.
    pub fn new(token: Option<SessionToken>) -> Self {
        let (sender, _) = watch::channel(token);

        Self {
            sender: Arc::new(sender),
        }
    }

    /// The current token, if the session is authenticated.
    pub fn token(&self) -> Option<SessionToken> {
        self.sender.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Remove the token.
    ///
    /// Returns `true` if a token was removed. Subscribers are only notified
    /// when the session actually changes.
    pub fn clear(&self) -> bool {
        self.sender.send_if_modified(|token| token.take().is_some())
    }

    /// Observe future changes to the token.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionToken>> {
        self.sender.subscribe()
    }
}
