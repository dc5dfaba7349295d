//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the fixed `#alert-container` element from the base
//! page, either as the body of an error response (via `hx-target-error`) or as
//! an out-of-band swap alongside a successful response.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

/// A dismissible notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

const SUCCESS_STYLE: &str = "text-green-800 border-green-300 bg-green-50 \
    dark:bg-gray-800 dark:text-green-400 dark:border-green-800";
const ERROR_STYLE: &str = "text-red-800 border-red-300 bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

impl Alert {
    pub fn is_error(&self) -> bool {
        matches!(self, Alert::Error { .. } | Alert::ErrorSimple { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Alert::Success { message, .. }
            | Alert::SuccessSimple { message }
            | Alert::Error { message, .. }
            | Alert::ErrorSimple { message } => message,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Alert::Success { details, .. } | Alert::Error { details, .. }
                if !details.is_empty() =>
            {
                Some(details.as_str())
            }
            _ => None,
        }
    }

    pub fn into_html(self) -> Markup {
        let style = if self.is_error() {
            ERROR_STYLE
        } else {
            SUCCESS_STYLE
        };

        html!(
            div
                role="alert"
                data-alert="true"
                class={"flex items-start gap-3 p-4 mb-2 text-sm rounded-lg border " (style)}
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (self.message()) }

                    @if let Some(details) = self.details() {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="ms-auto font-bold leading-none"
                    onclick="this.closest('[data-alert]').remove()"
                {
                    "×"
                }
            }
        )
    }
}

/// Render `alerts` directly, for use as the body of an error response.
pub fn alerts_html(alerts: &[Alert]) -> Markup {
    html!(
        @for alert in alerts {
            (alert.clone().into_html())
        }
    )
}

/// Render `alerts` as an out-of-band swap appended to `#alert-container`.
///
/// Renders nothing when there are no alerts.
pub fn alerts_oob_html(alerts: &[Alert]) -> Markup {
    html!(
        @if !alerts.is_empty() {
            div hx-swap-oob="beforeend:#alert-container"
            {
                (alerts_html(alerts))
            }
        }
    )
}

#[cfg(test)]
mod alert_tests {
    use scraper::{Html, Selector};

    use super::{Alert, alerts_oob_html};

    #[test]
    fn error_alert_shows_message_and_details() {
        let alert = Alert::Error {
            message: "Could not delete expense".to_owned(),
            details: "Try again.".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(paragraphs, vec!["Could not delete expense", "Try again."]);
        assert!(
            html.select(&Selector::parse("button[aria-label=Dismiss]").unwrap())
                .next()
                .is_some(),
            "alert should be dismissible"
        );
    }

    #[test]
    fn simple_alert_has_no_details() {
        let alert = Alert::SuccessSimple {
            message: "Expense added successfully!".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        assert_eq!(html.select(&Selector::parse("p").unwrap()).count(), 1);
    }

    #[test]
    fn oob_wrapper_targets_alert_container() {
        let alerts = [Alert::ErrorSimple {
            message: "Request timed out".to_owned(),
        }];

        let html = Html::parse_fragment(&alerts_oob_html(&alerts).into_string());

        let wrapper = html
            .select(&Selector::parse("div[hx-swap-oob]").unwrap())
            .next()
            .expect("missing out-of-band wrapper");
        assert_eq!(
            wrapper.value().attr("hx-swap-oob"),
            Some("beforeend:#alert-container")
        );
    }

    #[test]
    fn no_alerts_renders_nothing() {
        assert_eq!(alerts_oob_html(&[]).into_string(), "");
    }
}
