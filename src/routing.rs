//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    analytics::{export_analytics, get_analytics_page},
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_register_page, post_log_in,
        register_user,
    },
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_edit_expense_form,
        get_expenses_page, get_new_expense_form, update_expense_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    quote::get_quote,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::REGISTER_API, post(register_user))
        .route(endpoints::QUOTE_API, get(get_quote))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::ANALYTICS_VIEW, get(get_analytics_page))
        .route(endpoints::ANALYTICS_EXPORT, get(export_analytics))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // Routes requested by htmx need the HX-Redirect header for auth redirects to work.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_form))
            .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_form))
            .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
            .route(
                endpoints::EXPENSE_API,
                axum::routing::put(update_expense_endpoint).delete(delete_expense_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{
            MockBackend, assert_hx_redirects_to_log_in, assert_redirects_to_log_in,
            session_cookie, test_server,
        },
    };

    #[tokio::test]
    async fn root_redirects_to_expenses() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server.get(endpoints::ROOT).add_cookie(session_cookie()).await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::EXPENSES_VIEW);
    }

    #[tokio::test]
    async fn protected_pages_redirect_without_token() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        for endpoint in [
            endpoints::EXPENSES_VIEW,
            endpoints::ANALYTICS_VIEW,
            endpoints::ANALYTICS_EXPORT,
        ] {
            assert_redirects_to_log_in(&server.get(endpoint).await);
        }

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn htmx_routes_use_hx_redirect_without_token() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server
            .post(endpoints::EXPENSES_API)
            .add_header("HX-Request", "true")
            .form(&[("title", "Coffee")])
            .await;

        assert_hx_redirects_to_log_in(&response);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn htmx_fragment_without_token_returns_to_current_page() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server
            .get(&format_endpoint(endpoints::EDIT_EXPENSE_VIEW, "a"))
            .add_query_param("title", "Coffee")
            .add_query_param("amount", "4.5")
            .add_header("HX-Request", "true")
            .add_header("HX-Current-URL", "http://localhost/expenses")
            .await;

        let expected_query =
            serde_urlencoded::to_string([("redirect_url", endpoints::EXPENSES_VIEW)]).unwrap();
        assert_eq!(
            response.header("hx-redirect"),
            format!("{}?{}", endpoints::LOG_IN_VIEW, expected_query)
        );
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn auth_pages_and_quote_are_public() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        for endpoint in [
            endpoints::LOG_IN_VIEW,
            endpoints::REGISTER_VIEW,
            endpoints::QUOTE_API,
        ] {
            server.get(endpoint).await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let backend = MockBackend::start().await;
        let server = test_server(&backend);

        let response = server.get("/does-not-exist").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
