//! An in-process stand-in for the expense backend, plus helpers for building
//! servers and session cookies that talk to it.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use axum_test::TestServer;
use serde_json::{Value, json};

use crate::{
    AppState,
    api::{
        BACKEND_CATEGORY_WISE, BACKEND_DAILY_TOTALS, BACKEND_EXPENSES, BACKEND_LOG_IN,
        BACKEND_MONTHLY_TOTALS, BACKEND_PAYMENT_SOURCES, BACKEND_REGISTER, BACKEND_SUMMARY,
        BACKEND_WEEKLY_TOTALS,
    },
    auth::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, set_token_cookie},
    build_router,
    expense::{Expense, ExpenseFields, ExpenseId},
    session::SessionToken,
};

/// The token the mock backend hands out and accepts.
pub(crate) const TEST_TOKEN: &str = "test-token";
/// The only password the mock backend accepts at log-in.
pub(crate) const TEST_PASSWORD: &str = "correct horse battery staple";
pub(crate) const TEST_COOKIE_SECRET: &str = "nafstenoas";

/// A request the mock backend received.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    /// The JSON body, or `Value::Null` if there was none.
    pub body: Value,
}

#[derive(Debug, Clone, Copy)]
struct ForcedFailure {
    status: StatusCode,
    with_message: bool,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    failures: HashMap<(Method, String), ForcedFailure>,
    delays: HashMap<String, Duration>,
    expenses: Vec<Expense>,
    next_id: u64,
    analytics: HashMap<String, Value>,
    users: HashSet<String>,
}

fn default_analytics() -> HashMap<String, Value> {
    HashMap::from([
        (
            BACKEND_DAILY_TOTALS.to_owned(),
            json!([{"day": "2024-01-01", "totalAmount": 16.5}]),
        ),
        (
            BACKEND_WEEKLY_TOTALS.to_owned(),
            json!([{"week": 1, "totalAmount": 16.5}]),
        ),
        (
            BACKEND_MONTHLY_TOTALS.to_owned(),
            json!([{"month": "2024-01", "totalAmount": 16.5}]),
        ),
        (
            BACKEND_SUMMARY.to_owned(),
            json!({
                "totalExpenses": 16.5,
                "totalCategories": 2,
                "mostSpentCategory": "Food",
                "mostUsedPaymentSource": "Cash"
            }),
        ),
        (
            BACKEND_CATEGORY_WISE.to_owned(),
            json!([
                {"category": "Food", "totalAmount": 12},
                {"category": "Transport", "totalAmount": 4.5}
            ]),
        ),
        (
            BACKEND_PAYMENT_SOURCES.to_owned(),
            json!([{"paymentSource": "Cash", "count": 2}]),
        ),
    ])
}

/// An expense backend served on a random local port.
///
/// It keeps expenses in memory, records every request, and can be told to
/// fail or stall specific routes.
#[derive(Debug, Clone)]
pub(crate) struct MockBackend {
    /// The base URL to give the app, e.g. "http://127.0.0.1:54321".
    pub url: String,
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub(crate) async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState {
            analytics: default_analytics(),
            ..Default::default()
        }));
        let app = Router::new()
            .fallback(handle_request)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind mock backend");
        let address = listener
            .local_addr()
            .expect("Could not get mock backend address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock backend stopped unexpectedly");
        });

        Self {
            url: format!("http://{address}"),
            state,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("Mock backend state was poisoned")
    }

    /// Every request received so far, in order.
    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub(crate) fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.path == path)
            .collect()
    }

    pub(crate) fn count_calls(&self, method: Method, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    /// Answer `method path` with `status` and a JSON error message.
    pub(crate) fn fail(&self, method: Method, path: &str, status: StatusCode) {
        self.set_failure(method, path, status, true);
    }

    /// Answer `method path` with `status` and an empty body.
    pub(crate) fn fail_without_message(&self, method: Method, path: &str, status: StatusCode) {
        self.set_failure(method, path, status, false);
    }

    fn set_failure(&self, method: Method, path: &str, status: StatusCode, with_message: bool) {
        self.lock().failures.insert(
            (method, path.to_owned()),
            ForcedFailure {
                status,
                with_message,
            },
        );
    }

    /// Wait `delay` before answering any request to `path`.
    pub(crate) fn delay(&self, path: &str, delay: Duration) {
        self.lock().delays.insert(path.to_owned(), delay);
    }

    /// Replace the stored expenses.
    pub(crate) fn seed(&self, expenses: Vec<Expense>) {
        self.lock().expenses = expenses;
    }

    pub(crate) fn expenses(&self) -> Vec<Expense> {
        self.lock().expenses.clone()
    }

    /// Set the `data` field returned by the analytics route `path`.
    pub(crate) fn set_analytics(&self, path: &str, data: Value) {
        self.lock().analytics.insert(path.to_owned(), data);
    }
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn handle_request(
    State(state): State<Arc<Mutex<MockState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_owned();
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let (delay, failure) = {
        let mut state = state.lock().expect("Mock backend state was poisoned");
        state.calls.push(RecordedCall {
            method: method.clone(),
            path: path.clone(),
            authorization: authorization.clone(),
            body: body.clone(),
        });

        (
            state.delays.get(&path).copied(),
            state.failures.get(&(method.clone(), path.clone())).copied(),
        )
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    if let Some(failure) = failure {
        return match failure.with_message {
            true => message(failure.status, "forced failure"),
            false => failure.status.into_response(),
        };
    }

    let mut state = state.lock().expect("Mock backend state was poisoned");

    match (method, path.as_str()) {
        (Method::POST, BACKEND_LOG_IN) => {
            if body["password"] == json!(TEST_PASSWORD) {
                Json(json!({ "token": TEST_TOKEN })).into_response()
            } else {
                message(StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
        }
        (Method::POST, BACKEND_REGISTER) => {
            let phone_number = body["phoneNumber"].as_str().unwrap_or_default().to_owned();

            if state.users.insert(phone_number) {
                (
                    StatusCode::CREATED,
                    Json(json!({ "message": "User registered" })),
                )
                    .into_response()
            } else {
                message(StatusCode::BAD_REQUEST, "User already exists")
            }
        }
        _ if authorization.as_deref() != Some(format!("Bearer {TEST_TOKEN}").as_str()) => {
            message(StatusCode::UNAUTHORIZED, "Unauthorized")
        }
        (Method::GET, BACKEND_EXPENSES) => Json(state.expenses.clone()).into_response(),
        (Method::POST, BACKEND_EXPENSES) => match serde_json::from_value::<ExpenseFields>(body) {
            Ok(fields) => {
                state.next_id += 1;
                let id = ExpenseId::new(format!("generated-{}", state.next_id));
                let expense = Expense::from_fields(id, fields);
                state.expenses.push(expense.clone());

                (StatusCode::CREATED, Json(expense)).into_response()
            }
            Err(_) => message(StatusCode::BAD_REQUEST, "Invalid expense"),
        },
        (method, path) if path.starts_with("/expenses/") => {
            let id = ExpenseId::new(&path["/expenses/".len()..]);
            let Some(index) = state.expenses.iter().position(|expense| expense.id == id) else {
                return message(StatusCode::NOT_FOUND, "Expense not found");
            };

            match method {
                Method::PUT => match serde_json::from_value::<ExpenseFields>(body) {
                    Ok(fields) => {
                        state.expenses[index] = Expense::from_fields(id, fields);
                        Json(state.expenses[index].clone()).into_response()
                    }
                    Err(_) => message(StatusCode::BAD_REQUEST, "Invalid expense"),
                },
                Method::DELETE => {
                    state.expenses.remove(index);
                    message(StatusCode::OK, "Expense deleted")
                }
                _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
            }
        }
        (Method::GET, path) => match state.analytics.get(path) {
            Some(data) => Json(json!({ "data": data })).into_response(),
            None => message(StatusCode::NOT_FOUND, "Not found"),
        },
        _ => message(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// App state for a server whose backend lives at `api_url`.
pub(crate) fn test_app_state(api_url: &str) -> AppState {
    AppState::new(TEST_COOKIE_SECRET, api_url, Duration::from_secs(2))
        .expect("Could not create app state")
}

/// The full app, wired to `backend`.
pub(crate) fn test_server(backend: &MockBackend) -> TestServer {
    test_server_with_state(backend).0
}

/// The full app and its state, for tests that need to reach into the state.
pub(crate) fn test_server_with_state(backend: &MockBackend) -> (TestServer, AppState) {
    let state = test_app_state(&backend.url);
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (server, state)
}

/// Get the encrypted value of the cookie `name` that `jar` would send to the browser.
pub(crate) fn encrypted_cookie(jar: PrivateCookieJar, name: &str) -> Cookie<'static> {
    let response = jar.into_response();
    let cookie = response
        .headers()
        .get_all(axum::http::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value.to_owned()).ok())
        .find(|cookie| cookie.name() == name)
        .unwrap_or_else(|| panic!("No {name} cookie was set"));

    Cookie::new(name.to_owned(), cookie.value().to_owned())
}

/// A token cookie holding [TEST_TOKEN], encrypted with the test key.
pub(crate) fn session_cookie() -> Cookie<'static> {
    let key = crate::app_state::create_cookie_key(TEST_COOKIE_SECRET);
    let jar = set_token_cookie(
        PrivateCookieJar::new(key),
        &SessionToken::new(TEST_TOKEN),
        DEFAULT_COOKIE_DURATION,
    );

    encrypted_cookie(jar, COOKIE_TOKEN)
}

/// An expense from 2024-01-01 for food, paid in cash.
pub(crate) fn test_expense(id: &str, title: &str, amount: f64) -> Expense {
    Expense {
        id: ExpenseId::new(id),
        title: title.to_owned(),
        amount,
        date: "2024-01-01".to_owned(),
        category: "Food".to_owned(),
        payment_source: "Cash".to_owned(),
    }
}
