//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, api::ApiError, expense::ExpenseId, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount entered in the expense form is not a positive number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// An update or delete for the expense is already waiting on the backend.
    ///
    /// Only one mutation per expense may be in flight at a time.
    #[error("a change to expense {0} is already in progress")]
    MutationInProgress(ExpenseId),

    /// The analytics could not be written as CSV.
    #[error("could not write the CSV export: {0}")]
    CsvError(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A call to the expense backend failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::Api(ApiError::Timeout) => InternalServerError {
                description: "The expense service took too long to respond.",
                fix: "Try again in a moment.",
            }
            .into_response(),
            Error::Api(_) => InternalServerError {
                description: "Could not reach the expense service.",
                fix: "Try again later or check the server logs.",
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidAmount(amount) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!("\"{amount}\" is not a positive number."),
                },
            ),
            Error::MutationInProgress(_) => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Please wait".to_owned(),
                    details: "This expense is still being saved. \
                        Try again once the previous change has finished."
                        .to_owned(),
                },
            ),
            Error::Api(error) => (
                error.status_code(),
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "The expense service could not complete the request.".to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
