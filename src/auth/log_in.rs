//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The token returned by the backend is kept in an encrypted cookie.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState,
    alert::alerts_html,
    api::{ApiClient, ApiError, BACKEND_LOG_IN, PageEffects},
    auth::{
        cookie::{set_token_cookie, take_flash_cookie},
        normalize_redirect_url,
    },
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base_with_alerts, loading_spinner,
        log_in_register, password_input,
    },
    quote::{quote_container, quote_style},
    session::{Session, SessionToken},
};

/// The message shown when the backend rejects the credentials without saying why.
pub const AUTHENTICATION_FAILED_MSG: &str = "Authentication failed";

/// The phone number input shared by the log-in and registration forms.
pub(super) fn phone_number_input(value: &str) -> Markup {
    html! {
        div
        {
            label for="phone_number" class=(FORM_LABEL_STYLE) { "Phone number" }

            input
                type="tel"
                name="phone_number"
                id="phone_number"
                value=(value)
                placeholder="0211234567"
                autocomplete="tel"
                class=(FORM_TEXT_INPUT_STYLE)
                required;
        }
    }
}

pub(super) fn submit_button(text: &str) -> Markup {
    html! {
        button
            type="submit" id="submit-button" tabindex="0"
            class="w-full px-4 py-2 bg-blue-500 dark:bg-blue-600 disabled:bg-blue-700
                hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700 text-white rounded"
        {
            span class="inline htmx-indicator" id="indicator"
            {
                (loading_spinner())
            }
            (text)
        }
    }
}

fn log_in_form(
    phone_number: &str,
    error_message: Option<&str>,
    redirect_url: Option<&str>,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#phone_number, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            (phone_number_input(phone_number))

            (password_input(error_message))

            (submit_button("Log in"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                a href=(endpoints::REGISTER_VIEW) tabindex="0" class={"font-semibold leading-6 " (LINK_STYLE)}
                {
                  "Sign up here"
                }
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// Display the log-in page along with any notice carried over from a redirect.
pub async fn get_log_in_page(jar: PrivateCookieJar, Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let (jar, flash) = take_flash_cookie(jar);

    let form = log_in_form("", None, redirect_url.as_deref());
    let content = html! {
        (log_in_register("Log in to your account", &form))
        (quote_container())
    };
    let alerts = alerts_html(flash.as_slice());

    (
        jar,
        base_with_alerts("Log In", &[quote_style()], &content, &alerts),
    )
        .into_response()
}

/// The state needed to perform a log-in.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How long the token cookie is kept by the browser.
    pub cookie_duration: Duration,
    pub http_client: reqwest::Client,
    pub api_url: String,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            http_client: state.http_client.clone(),
            api_url: state.api_url.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The credentials the backend expects at `/auth/login` and `/auth/register`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Credentials<'a> {
    pub phone_number: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Create a client for calls made before a session exists.
pub(super) fn anonymous_client(http_client: reqwest::Client, api_url: &str) -> ApiClient {
    ApiClient::new(
        http_client,
        api_url,
        Session::new(None),
        Arc::new(PageEffects::default()),
    )
}

/// The message to show in the form for a failed credential exchange.
pub(super) fn credential_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Status {
            message: Some(message),
            ..
        } => message.clone(),
        ApiError::Timeout => "Request timed out, please try again.".to_owned(),
        ApiError::Transport(_) => "Could not reach the server, please try again later.".to_owned(),
        _ => AUTHENTICATION_FAILED_MSG.to_owned(),
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the token cookie is set and the client is
/// redirected to the expenses page, or the page they were sent away from.
/// Otherwise, the form is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();

    let client = anonymous_client(state.http_client, &state.api_url);
    let credentials = Credentials {
        phone_number: &user_data.phone_number,
        password: &user_data.password,
    };

    let token = match client
        .exchange_credentials::<_, TokenResponse>(BACKEND_LOG_IN, &credentials)
        .await
    {
        Ok(response) => SessionToken::new(response.token),
        Err(error) => {
            tracing::info!("Log-in failed: {error}");
            return log_in_form(
                &user_data.phone_number,
                Some(&credential_error_message(&error)),
                redirect_url,
            )
            .into_response();
        }
    };

    let jar = set_token_cookie(jar, &token, state.cookie_duration);
    let redirect_url = redirect_url.unwrap_or(endpoints::EXPENSES_VIEW);

    (
        StatusCode::SEE_OTHER,
        HxRedirect(redirect_url.to_owned()),
        jar,
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// The raw data entered by the user in the log-in form.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    pub phone_number: String,

    /// Password entered during log-in, checked by the backend.
    pub password: String,

    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}
