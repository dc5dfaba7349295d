//! The authenticated HTTP client for the expense backend.

use std::{fmt, sync::Arc, time::Instant};

use axum::http::StatusCode;
use reqwest::Method;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{alert::Alert, endpoints, session::Session};

pub(crate) const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired";
pub(crate) const SESSION_EXPIRED_DETAILS: &str =
    "You are not logged in. Redirecting to login page.";
pub(crate) const REQUEST_TIMED_OUT_MESSAGE: &str = "Request timed out";

/// Receives the user-visible side effects of backend calls.
///
/// The client never touches the response itself; implementors decide how
/// notices are shown and how navigation happens.
pub trait ClientObserver: Send + Sync {
    /// Show `alert` to the user.
    fn notify(&self, alert: Alert);

    /// Send the user to `url` with a full page navigation.
    fn navigate(&self, url: &str);
}

/// The ways a backend call can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the session token (HTTP 401).
    ///
    /// By the time the caller sees this the session has been cleared and the
    /// observer has been told to navigate to the log-in page.
    #[error("the session is not authorized")]
    Unauthorized,

    /// The backend did not respond within the configured timeout.
    #[error("the request timed out")]
    Timeout,

    /// The backend responded with a non-success status.
    ///
    /// `message` is the `message` field of the JSON error body, if it had one.
    #[error("the backend responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The backend could not be reached.
    #[error("could not reach the backend: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("could not decode the backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The status code to use when reporting this error to the browser.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Status { status, .. } if *status < 500 => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Status { .. } | ApiError::Transport(_) | ApiError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

/// What to do when the backend answers 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnUnauthorized {
    /// Clear the session and navigate to the log-in page.
    ExpireSession,
    /// Hand the 401 back to the caller, e.g. for a wrong password.
    ReturnError,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// The single gateway for backend calls made on behalf of one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    observer: Arc<dyn ClientObserver>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// Requests carry the token held by `session`, if any. Session expiry and
    /// timeouts are reported to `observer`.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        session: Session,
        observer: Arc<dyn ClientObserver>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            session,
            observer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .send(Method::GET, path, None::<&()>, OnUnauthorized::ExpireSession)
            .await?;

        self.decode(&Method::GET, path, response).await
    }

    /// POST `body` as JSON to `path`, ignoring the response body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(Method::POST, path, Some(body), OnUnauthorized::ExpireSession)
            .await
            .map(drop)
    }

    /// PUT `body` as JSON to `path`, ignoring the response body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send(Method::PUT, path, Some(body), OnUnauthorized::ExpireSession)
            .await
            .map(drop)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None::<&()>, OnUnauthorized::ExpireSession)
            .await
            .map(drop)
    }

    /// POST credentials to one of the `/auth` endpoints and decode the reply.
    ///
    /// These calls happen before a session exists, so a 401 means the
    /// credentials were wrong and is returned as [ApiError::Status] instead
    /// of expiring the session.
    pub async fn exchange_credentials<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(Method::POST, path, Some(body), OnUnauthorized::ReturnError)
            .await?;

        self.decode(&Method::POST, path, response).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        on_unauthorized: OnUnauthorized,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self
            .http
            .request(method.clone(), format!("{}{}", self.base_url, path));

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token.as_str());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|error| self.transport_error(&method, path, error))?;
        let status = response.status();

        tracing::debug!("{method} {path} returned {status} in {:?}", started.elapsed());

        if status == StatusCode::UNAUTHORIZED && on_unauthorized == OnUnauthorized::ExpireSession {
            self.expire_session(&method, path);
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = read_error_message(response).await;
            tracing::warn!("{method} {path} failed with status {status}: {message:?}");

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let body = response
            .bytes()
            .await
            .map_err(|error| self.transport_error(method, path, error))?;

        serde_json::from_slice(&body).map_err(|error| {
            tracing::error!("Could not decode the response to {method} {path}: {error}");
            ApiError::Decode(error.to_string())
        })
    }

    fn transport_error(&self, method: &Method, path: &str, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            tracing::warn!("{method} {path} timed out");
            self.observer.notify(Alert::ErrorSimple {
                message: REQUEST_TIMED_OUT_MESSAGE.to_owned(),
            });

            return ApiError::Timeout;
        }

        tracing::error!("{method} {path} failed: {error}");
        ApiError::Transport(error.to_string())
    }

    fn expire_session(&self, method: &Method, path: &str) {
        if self.session.clear() {
            tracing::info!("{method} {path} rejected the session token, clearing the session");
        } else {
            tracing::info!("{method} {path} requires a session but none was provided");
        }

        self.observer.notify(Alert::Error {
            message: SESSION_EXPIRED_MESSAGE.to_owned(),
            details: SESSION_EXPIRED_DETAILS.to_owned(),
        });
        self.observer.navigate(endpoints::LOG_IN_VIEW);
    }
}

async fn read_error_message(response: reqwest::Response) -> Option<String> {
    let body = response.bytes().await.ok()?;

    serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message)
}
