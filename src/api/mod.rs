//! Talking to the expense backend.
//!
//! [ApiClient] is the single gateway for every backend call. It attaches the
//! session's bearer token and turns authorization failures and timeouts into
//! notices and navigations on a [ClientObserver]. [Backend] is the extractor
//! handlers use to get a client wired to the current request's session, and
//! to turn those side effects into the HTTP response.

mod client;
mod effects;

pub use client::{ApiClient, ApiError, ClientObserver};
pub use effects::{Backend, BackendState, PageEffects};

/// Exchange a phone number and password for a token.
pub const BACKEND_LOG_IN: &str = "/auth/login";
/// Create an account.
pub const BACKEND_REGISTER: &str = "/auth/register";
/// List or create expenses.
pub const BACKEND_EXPENSES: &str = "/expenses";
/// Update or delete a single expense.
pub const BACKEND_EXPENSE: &str = "/expenses/{id}";

pub const BACKEND_DAILY_TOTALS: &str = "/analytics/daily-totals";
pub const BACKEND_WEEKLY_TOTALS: &str = "/analytics/weekly-totals";
pub const BACKEND_MONTHLY_TOTALS: &str = "/analytics/monthly-totals";
pub const BACKEND_SUMMARY: &str = "/analytics/summary";
pub const BACKEND_CATEGORY_WISE: &str = "/analytics/category-wise";
pub const BACKEND_PAYMENT_SOURCES: &str = "/analytics/payment-source-distribution";
