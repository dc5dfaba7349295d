//! Adding new expenses.

use axum::{Form, response::Response};
use maud::Markup;

use crate::{
    alert::Alert,
    api::Backend,
    expense::{
        ExpenseFormData, create_expense,
        form::ExpenseForm,
        page::{invalid_form_response, respond_with_fresh_list},
    },
};

/// A blank form in create mode, used by the cancel button of the edit form.
pub async fn get_new_expense_form() -> Markup {
    ExpenseForm::new(None).into_html()
}

/// Create an expense and respond with the refreshed list and a blank form.
pub async fn create_expense_endpoint(
    backend: Backend,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    let fields = match form.parse() {
        Ok(fields) => fields,
        Err(error) => {
            return invalid_form_response(ExpenseForm::new(None).with_values(form), &error);
        }
    };

    if let Err(error) = create_expense(&backend.client, &fields).await {
        tracing::error!("Could not create expense: {error}");
        return backend.respond_alert(
            error.status_code(),
            Alert::ErrorSimple {
                message: "Failed to add expense. Please try again.".to_owned(),
            },
        );
    }

    respond_with_fresh_list(
        backend,
        Alert::SuccessSimple {
            message: "Expense added successfully!".to_owned(),
        },
        ExpenseForm::new(None).out_of_band().into_html(),
    )
    .await
}

#[cfg(test)]
mod create_expense_tests {
    use axum::http::{Method, StatusCode};
    use scraper::{Html, Selector};
    use serde_json::json;

    use crate::{
        api::BACKEND_EXPENSES,
        endpoints,
        expense::page::INVALID_AMOUNT_MSG,
        test_utils::{
            MockBackend, assert_form_input_with_value, assert_hx_endpoint,
            assert_hx_redirects_to_log_in, must_get_form, session_cookie, test_server,
        },
    };

    fn coffee_form() -> Vec<(&'static str, &'static str)> {
        vec![
            ("title", "Coffee"),
            ("amount", "4.50"),
            ("date", "2024-01-01"),
            ("category", "Food"),
            ("payment_source", "Cash"),
        ]
    }

    #[tokio::test]
    async fn creates_expense_and_relists() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server
            .post(endpoints::EXPENSES_API)
            .add_header("HX-Request", "true")
            .add_cookie(session_cookie())
            .form(&coffee_form())
            .await;

        response.assert_status_ok();
        let creates = backend.calls_to(BACKEND_EXPENSES);
        assert_eq!(creates[0].method, Method::POST);
        assert_eq!(
            creates[0].body,
            json!({
                "title": "Coffee",
                "amount": 4.5,
                "date": "2024-01-01",
                "category": "Food",
                "paymentSource": "Cash"
            })
        );
        assert_eq!(backend.count_calls(Method::GET, BACKEND_EXPENSES), 1);

        let html = Html::parse_fragment(&response.text());
        let rows = html
            .select(&Selector::parse("tr[data-expense-row]").unwrap())
            .count();
        assert_eq!(rows, 1);
        assert!(response.text().contains("Expense added successfully!"));
    }

    #[tokio::test]
    async fn success_resets_the_form() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server
            .post(endpoints::EXPENSES_API)
            .add_cookie(session_cookie())
            .form(&coffee_form())
            .await;

        let html = Html::parse_fragment(&response.text());
        let slot = html
            .select(&Selector::parse("#expense-form[hx-swap-oob]").unwrap())
            .next()
            .expect("No out-of-band form found");
        let form = slot
            .select(&Selector::parse("form").unwrap())
            .next()
            .unwrap();
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
        assert_form_input_with_value(&form, "title", "text", "");
    }

    #[tokio::test]
    async fn invalid_amount_is_rejected_before_backend() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);
        let mut form = coffee_form();
        form[1] = ("amount", "-3");

        let response = server
            .post(endpoints::EXPENSES_API)
            .add_cookie(session_cookie())
            .form(&form)
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-retarget"), "#expense-form");
        assert_eq!(response.header("hx-reswap"), "outerHTML");
        let html = Html::parse_fragment(&response.text());
        let form = must_get_form(&html);
        assert_form_input_with_value(&form, "amount", "text", "-3");
        assert!(response.text().contains(INVALID_AMOUNT_MSG));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_create_shows_alert_without_relisting() {
        let backend = MockBackend::start().await;
        backend.fail(Method::POST, BACKEND_EXPENSES, StatusCode::INTERNAL_SERVER_ERROR);
        let server = test_server(&backend);

        let response = server
            .post(endpoints::EXPENSES_API)
            .add_cookie(session_cookie())
            .form(&coffee_form())
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
        assert!(
            response
                .text()
                .contains("Failed to add expense. Please try again.")
        );
        assert_eq!(backend.count_calls(Method::GET, BACKEND_EXPENSES), 0);
        assert!(backend.expenses().is_empty());
    }

    #[tokio::test]
    async fn expired_session_redirects_htmx_request() {
        let backend = MockBackend::start().await;
        backend.fail(Method::POST, BACKEND_EXPENSES, StatusCode::UNAUTHORIZED);
        let server = test_server(&backend);

        let response = server
            .post(endpoints::EXPENSES_API)
            .add_header("HX-Request", "true")
            .add_header("HX-Current-URL", "http://localhost/expenses")
            .add_cookie(session_cookie())
            .form(&coffee_form())
            .await;

        response.assert_status_ok();
        assert_hx_redirects_to_log_in(&response);
        assert_eq!(backend.count_calls(Method::GET, BACKEND_EXPENSES), 0);
    }

    #[tokio::test]
    async fn new_form_fragment_is_blank() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server
            .get(endpoints::NEW_EXPENSE_VIEW)
            .add_cookie(session_cookie())
            .await;

        response.assert_status_ok();
        let html = Html::parse_fragment(&response.text());
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::EXPENSES_API, "hx-post");
    }
}
