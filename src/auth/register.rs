//! The sign-up page for creating an account with the backend.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    alert::Alert,
    api::{BACKEND_REGISTER, BackendState},
    auth::{
        cookie::set_flash_cookie,
        log_in::{
            Credentials, anonymous_client, credential_error_message, phone_number_input,
            submit_button,
        },
    },
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, log_in_register, password_input},
    quote::{quote_container, quote_style},
};

pub const SIGNUP_SUCCESS_MSG: &str = "Signup successful! Please log in.";
const PASSWORD_MISMATCH_MSG: &str = "Passwords do not match";

fn confirm_password_input(error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label for="confirm_password" class=(FORM_LABEL_STYLE) { "Confirm Password" }

            input
                type="password"
                name="confirm_password"
                id="confirm_password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                autofocus[error_message.is_some()];

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }
    }
}

fn registration_form(
    phone_number: &str,
    password_error_message: Option<&str>,
    confirm_password_error_message: Option<&str>,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::REGISTER_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#phone_number, #password, #confirm_password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            (phone_number_input(phone_number))
            (password_input(password_error_message))
            (confirm_password_input(confirm_password_error_message))

            (submit_button("Sign up"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Already have an account? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class={"font-semibold leading-6 " (LINK_STYLE)}
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the sign-up page.
pub async fn get_register_page() -> Response {
    let form = registration_form("", None, None);
    let content = html! {
        (log_in_register("Create an account", &form))
        (quote_container())
    };

    base("Sign Up", &[quote_style()], &content).into_response()
}

/// The data entered by the user in the sign-up form.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

/// Create an account with the backend.
///
/// On success the user is sent to the log-in page with a notice. The user is
/// not logged in automatically. Otherwise, the form is returned with the
/// backend's error message.
pub async fn register_user(
    State(state): State<BackendState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    if user_data.password != user_data.confirm_password {
        return registration_form(&user_data.phone_number, None, Some(PASSWORD_MISMATCH_MSG))
            .into_response();
    }

    let client = anonymous_client(state.http_client, &state.api_url);
    let credentials = Credentials {
        phone_number: &user_data.phone_number,
        password: &user_data.password,
    };

    // The backend's reply body is not needed, only its status.
    if let Err(error) = client
        .exchange_credentials::<_, serde_json::Value>(BACKEND_REGISTER, &credentials)
        .await
    {
        tracing::info!("Sign-up failed: {error}");
        return registration_form(
            &user_data.phone_number,
            Some(&credential_error_message(&error)),
            None,
        )
        .into_response();
    }

    let jar = set_flash_cookie(
        jar,
        &Alert::SuccessSimple {
            message: SIGNUP_SUCCESS_MSG.to_owned(),
        },
    );

    (
        StatusCode::SEE_OTHER,
        HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
        jar,
    )
        .into_response()
}
