//! Turns the side effects of backend calls into the HTTP response.

use std::{
    convert::Infallible,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use tokio::sync::watch;

use crate::{
    AppState,
    alert::{Alert, alerts_html, alerts_oob_html},
    api::{ApiClient, ClientObserver},
    auth::{
        build_log_in_redirect_url_from_target, get_token_from_cookies, invalidate_token_cookie,
        is_htmx_request, redirect_target, set_flash_cookie,
    },
    endpoints,
    session::{Session, SessionToken},
};

/// The state needed to build an [ApiClient] for a request.
#[derive(Debug, Clone)]
pub struct BackendState {
    pub cookie_key: Key,
    pub http_client: reqwest::Client,
    pub api_url: String,
}

impl FromRef<AppState> for BackendState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            http_client: state.http_client.clone(),
            api_url: state.api_url.clone(),
        }
    }
}

impl FromRef<BackendState> for Key {
    fn from_ref(state: &BackendState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Debug, Default)]
struct EffectLog {
    alerts: Vec<Alert>,
    navigations: Vec<String>,
}

/// Collects the notices and navigations raised while handling one request.
#[derive(Debug, Default)]
pub struct PageEffects {
    log: Mutex<EffectLog>,
}

impl PageEffects {
    /// The notices raised so far, in order, without duplicates.
    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().alerts.clone()
    }

    /// Every navigation requested so far, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EffectLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClientObserver for PageEffects {
    fn notify(&self, alert: Alert) {
        let mut log = self.lock();

        if !log.alerts.contains(&alert) {
            log.alerts.push(alert);
        }
    }

    fn navigate(&self, url: &str) {
        self.lock().navigations.push(url.to_owned());
    }
}

/// Extractor that gives a handler an [ApiClient] for the current session.
///
/// The handler finishes by calling one of the `respond*` methods. If a call
/// expired the session, those methods delete the token cookie and redirect to
/// the log-in page instead of rendering the handler's content. Any other
/// notices are added to the response as alerts.
pub struct Backend {
    pub client: ApiClient,
    effects: Arc<PageEffects>,
    session_changes: watch::Receiver<Option<SessionToken>>,
    jar: PrivateCookieJar,
    is_htmx: bool,
    return_to: Option<String>,
}

impl<S> FromRequestParts<S> for Backend
where
    BackendState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = BackendState::from_ref(state);
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key.clone());

        let session = Session::new(get_token_from_cookies(&jar));
        let session_changes = session.subscribe();
        let effects = Arc::new(PageEffects::default());
        let client = ApiClient::new(state.http_client, &state.api_url, session, effects.clone());

        Ok(Self {
            client,
            effects,
            session_changes,
            jar,
            is_htmx: is_htmx_request(&parts.headers),
            return_to: redirect_target(&parts.headers, &parts.uri),
        })
    }
}

impl Backend {
    /// Queue `alert` to be shown with the response.
    pub fn notify(&self, alert: Alert) {
        self.effects.notify(alert);
    }

    /// Respond with `content` and any pending notices as out-of-band alerts.
    pub fn respond(self, status: StatusCode, content: Markup) -> Response {
        self.finish(|alerts| {
            (
                status,
                html! {
                    (content)
                    (alerts_oob_html(&alerts))
                },
            )
                .into_response()
        })
    }

    /// Respond with a full page, passing the pending notices to `page` so it
    /// can place them in the alert container.
    pub fn respond_page(self, page: impl FnOnce(&Markup) -> Markup) -> Response {
        self.finish(|alerts| page(&alerts_html(&alerts)).into_response())
    }

    /// Respond with `alert`, and any other pending notices, as the only content.
    ///
    /// Use this for error responses so that htmx puts the alerts in the
    /// alert container via `hx-target-error`.
    pub fn respond_alert(self, status: StatusCode, alert: Alert) -> Response {
        self.effects.notify(alert);

        self.finish(|alerts| (status, alerts_html(&alerts)).into_response())
    }

    /// Respond with `response` unchanged unless the session expired.
    pub fn respond_with(self, response: impl IntoResponse) -> Response {
        self.finish(|_| response.into_response())
    }

    fn session_was_cleared(&self) -> bool {
        matches!(self.session_changes.has_changed(), Ok(true))
            && self.session_changes.borrow().is_none()
    }

    fn finish(self, build: impl FnOnce(Vec<Alert>) -> Response) -> Response {
        let mut jar = if self.session_was_cleared() {
            invalidate_token_cookie(self.jar.clone())
        } else {
            self.jar.clone()
        };

        let Some(navigation) = self.effects.navigations().into_iter().next() else {
            return (jar, build(self.effects.alerts())).into_response();
        };

        // The next page is a full page load, so the notice travels in a cookie.
        if let Some(alert) = self.effects.alerts().first() {
            jar = set_flash_cookie(jar, alert);
        }

        let target = if navigation == endpoints::LOG_IN_VIEW {
            self.return_to
                .as_deref()
                .and_then(build_log_in_redirect_url_from_target)
                .unwrap_or(navigation)
        } else {
            navigation
        };

        if self.is_htmx {
            (jar, HxRedirect(target), StatusCode::OK).into_response()
        } else {
            (jar, Redirect::to(&target)).into_response()
        }
    }
}
