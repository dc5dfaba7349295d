//! Fetching the six analytics aggregates concurrently.

use serde::de::DeserializeOwned;

use crate::{
    analytics::models::{CategoryTotal, Envelope, PaymentSourceCount, PeriodTotal, Summary},
    api::{
        ApiClient, ApiError, BACKEND_CATEGORY_WISE, BACKEND_DAILY_TOTALS, BACKEND_MONTHLY_TOTALS,
        BACKEND_PAYMENT_SOURCES, BACKEND_SUMMARY, BACKEND_WEEKLY_TOTALS,
    },
};

/// One section of the analytics page. A failed fetch only affects its own section.
pub type Section<T> = Result<T, ApiError>;

/// Everything shown on the analytics page, as computed by the backend.
#[derive(Debug)]
pub struct Analytics {
    pub daily: Section<Vec<PeriodTotal>>,
    pub weekly: Section<Vec<PeriodTotal>>,
    pub monthly: Section<Vec<PeriodTotal>>,
    pub summary: Section<Summary>,
    pub categories: Section<Vec<CategoryTotal>>,
    pub payment_sources: Section<Vec<PaymentSourceCount>>,
}

async fn fetch_section<T>(client: &ApiClient, path: &str) -> Section<T>
where
    T: DeserializeOwned + Default,
{
    let envelope: Envelope<T> = client
        .get(path)
        .await
        .inspect_err(|error| tracing::warn!("Could not fetch analytics from {path}: {error}"))?;

    Ok(envelope.data.unwrap_or_default())
}

/// Request all six aggregates at once and wait for every one of them to settle.
pub async fn fetch_analytics(client: &ApiClient) -> Analytics {
    let (daily, weekly, monthly, summary, categories, payment_sources) = tokio::join!(
        fetch_section(client, BACKEND_DAILY_TOTALS),
        fetch_section(client, BACKEND_WEEKLY_TOTALS),
        fetch_section(client, BACKEND_MONTHLY_TOTALS),
        fetch_section(client, BACKEND_SUMMARY),
        fetch_section(client, BACKEND_CATEGORY_WISE),
        fetch_section(client, BACKEND_PAYMENT_SOURCES),
    );

    Analytics {
        daily,
        weekly,
        monthly,
        summary,
        categories,
        payment_sources,
    }
}

#[cfg(test)]
mod fetch_tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};

    use crate::{
        api::{ApiClient, ApiError, BACKEND_SUMMARY, BACKEND_WEEKLY_TOTALS, PageEffects},
        session::{Session, SessionToken},
        test_utils::{MockBackend, TEST_TOKEN},
    };

    use super::fetch_analytics;

    fn client(backend: &MockBackend) -> (ApiClient, Arc<PageEffects>) {
        let effects = Arc::new(PageEffects::default());
        let client = ApiClient::new(
            reqwest::Client::new(),
            &backend.url,
            Session::new(Some(SessionToken::new(TEST_TOKEN))),
            effects.clone(),
        );

        (client, effects)
    }

    #[tokio::test]
    async fn fetches_all_six_sections() {
        let backend = MockBackend::start().await;
        let (client, _) = client(&backend);

        let analytics = fetch_analytics(&client).await;

        assert_eq!(backend.calls().len(), 6);
        assert!(!analytics.daily.unwrap().is_empty());
        assert!(!analytics.weekly.unwrap().is_empty());
        assert!(!analytics.monthly.unwrap().is_empty());
        assert_eq!(
            analytics.summary.unwrap().most_spent_category.as_deref(),
            Some("Food")
        );
        assert!(!analytics.categories.unwrap().is_empty());
        assert!(!analytics.payment_sources.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_section_does_not_affect_the_others() {
        let backend = MockBackend::start().await;
        backend.fail(Method::GET, BACKEND_WEEKLY_TOTALS, StatusCode::INTERNAL_SERVER_ERROR);
        let (client, _) = client(&backend);

        let analytics = fetch_analytics(&client).await;

        assert!(matches!(analytics.weekly, Err(ApiError::Status { status: 500, .. })));
        assert!(analytics.daily.is_ok());
        assert!(analytics.summary.is_ok());
        assert!(analytics.payment_sources.is_ok());
    }

    #[tokio::test]
    async fn missing_data_is_empty() {
        let backend = MockBackend::start().await;
        backend.set_analytics(BACKEND_SUMMARY, serde_json::json!({}));
        let (client, _) = client(&backend);

        let analytics = fetch_analytics(&client).await;

        assert_eq!(analytics.summary.unwrap(), Default::default());
    }

    #[tokio::test]
    async fn unauthorized_section_expires_the_session_once() {
        let backend = MockBackend::start().await;
        backend.fail(Method::GET, BACKEND_SUMMARY, StatusCode::UNAUTHORIZED);
        backend.fail(Method::GET, BACKEND_WEEKLY_TOTALS, StatusCode::UNAUTHORIZED);
        let (client, effects) = client(&backend);

        let analytics = fetch_analytics(&client).await;

        assert_eq!(analytics.summary.unwrap_err(), ApiError::Unauthorized);
        assert!(!client.session().is_authenticated());
        assert_eq!(effects.alerts().len(), 1);
        assert!(!effects.navigations().is_empty());
    }
}
