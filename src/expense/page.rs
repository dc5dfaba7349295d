//! The expenses page and the refreshed list returned after every change.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HX_RESWAP, HX_RETARGET};
use maud::{Markup, html};

use crate::{
    Error,
    alert::Alert,
    api::Backend,
    endpoints,
    expense::{
        Expense,
        form::{EXPENSE_FORM_ID, ExpenseForm},
        list::{EXPENSE_LIST_ID, expense_list_section, expense_list_view},
        list_expenses,
    },
    html::{PAGE_CONTAINER_STYLE, base_with_alerts},
    navigation::NavBar,
};

pub(super) const FETCH_FAILED_MSG: &str = "Failed to fetch expenses. Please try again later.";
pub(super) const INVALID_AMOUNT_MSG: &str = "Amount must be a number greater than zero.";

fn expenses_view(list: &Markup, alerts: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-6xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Expenses" }
                }

                div class="flex flex-col lg:flex-row gap-6 items-start"
                {
                    (ExpenseForm::new(None).into_html())

                    (list)
                }
            }
        }
    };

    base_with_alerts("Expenses", &[], &content, alerts)
}

fn unavailable_list() -> Markup {
    html! {
        section id=(EXPENSE_LIST_ID) class="w-full space-y-4"
        {
            p class="text-center text-gray-500 dark:text-gray-400"
            {
                "Your expenses could not be loaded. Refresh the page to try again."
            }
        }
    }
}

/// Render the expenses page with the form in create mode.
pub async fn get_expenses_page(backend: Backend) -> Response {
    let list = match list_expenses(&backend.client).await {
        Ok(expenses) => expense_list_section(&expenses),
        Err(error) => {
            tracing::error!("Could not fetch expenses: {error}");
            backend.notify(Alert::ErrorSimple {
                message: FETCH_FAILED_MSG.to_owned(),
            });
            unavailable_list()
        }
    };

    backend.respond_page(|alerts| expenses_view(&list, alerts))
}

/// Fetch the list again after a successful change and respond with it.
///
/// `extra` is appended to the list, e.g. an out-of-band form reset.
pub(super) async fn respond_with_fresh_list(
    backend: Backend,
    success: Alert,
    extra: Markup,
) -> Response {
    let expenses: Vec<Expense> = match list_expenses(&backend.client).await {
        Ok(expenses) => expenses,
        Err(error) => {
            tracing::error!("Could not fetch expenses after a change: {error}");
            backend.notify(success);
            return backend.respond_alert(
                error.status_code(),
                Alert::ErrorSimple {
                    message: FETCH_FAILED_MSG.to_owned(),
                },
            );
        }
    };

    backend.notify(success);
    backend.respond(
        StatusCode::OK,
        html! {
            (expense_list_view(&expenses))
            (extra)
        },
    )
}

/// Swap `form` with the error back into the form slot instead of the list.
pub(super) fn invalid_form_response(form: ExpenseForm, error: &Error) -> Response {
    tracing::info!("Rejected expense form: {error}");
    let message = match error {
        Error::InvalidAmount(_) => INVALID_AMOUNT_MSG,
        _ => "Please check the form and try again.",
    };

    (
        [
            (HX_RETARGET, format!("#{EXPENSE_FORM_ID}")),
            (HX_RESWAP, "outerHTML".to_owned()),
        ],
        form.with_error(message).into_html(),
    )
        .into_response()
}

#[cfg(test)]
mod expenses_page_tests {
    use axum::http::{Method, StatusCode};
    use scraper::{Html, Selector};

    use crate::{
        api::BACKEND_EXPENSES,
        endpoints,
        expense::list::EMPTY_LIST_MESSAGE,
        test_utils::{
            MockBackend, assert_hx_endpoint, assert_valid_html, must_get_form, session_cookie,
            test_expense, test_server,
        },
    };

    use super::FETCH_FAILED_MSG;

    #[tokio::test]
    async fn page_shows_create_form_and_expenses() {
        let backend = MockBackend::start().await;
        backend.seed(vec![test_expense("a", "Coffee", 4.5)]);
        let server = test_server(&backend);

        let response = server
            .get(endpoints::EXPENSES_VIEW)
            .add_cookie(session_cookie())
            .await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
        let rows = document
            .select(&Selector::parse("#expense-list tr[data-expense-row]").unwrap())
            .count();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn page_shows_empty_state() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server
            .get(endpoints::EXPENSES_VIEW)
            .add_cookie(session_cookie())
            .await;

        assert!(response.text().contains(EMPTY_LIST_MESSAGE));
    }

    #[tokio::test]
    async fn page_shows_alert_when_list_fails() {
        let backend = MockBackend::start().await;
        backend.fail(Method::GET, BACKEND_EXPENSES, StatusCode::INTERNAL_SERVER_ERROR);
        let server = test_server(&backend);

        let response = server
            .get(endpoints::EXPENSES_VIEW)
            .add_cookie(session_cookie())
            .await;

        response.assert_status_ok();
        let document = Html::parse_document(&response.text());
        let alert = document
            .select(&Selector::parse("#alert-container [role=alert]").unwrap())
            .next()
            .expect("No alert found");
        assert!(alert.text().collect::<String>().contains(FETCH_FAILED_MSG));
        assert!(!response.text().contains(EMPTY_LIST_MESSAGE));
    }

    #[tokio::test]
    async fn page_redirects_to_log_in_when_session_expired() {
        let backend = MockBackend::start().await;
        backend.fail(Method::GET, BACKEND_EXPENSES, StatusCode::UNAUTHORIZED);
        let server = test_server(&backend);

        let response = server
            .get(endpoints::EXPENSES_VIEW)
            .add_cookie(session_cookie())
            .await;

        response.assert_status_see_other();
        assert!(
            response
                .header("location")
                .to_str()
                .unwrap()
                .starts_with(endpoints::LOG_IN_VIEW)
        );
    }

    #[tokio::test]
    async fn page_without_token_redirects_to_log_in() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server.get(endpoints::EXPENSES_VIEW).await;

        response.assert_status_see_other();
        assert!(backend.calls().is_empty());
    }
}
