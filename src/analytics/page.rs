//! The analytics page with its summary and chart sections.

use axum::response::Response;
use charming::Chart;
use maud::{Markup, html};

use crate::{
    analytics::{
        charts::{
            AnalyticsChart, category_chart, chart_container, charts_script, payment_source_chart,
            period_chart,
        },
        fetch::{Analytics, Section, fetch_analytics},
        models::PeriodTotal,
        tables::{category_table, payment_source_table, period_table, summary_cards},
    },
    api::Backend,
    endpoints,
    html::{BUTTON_SECONDARY_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base_with_alerts},
    navigation::NavBar,
    quote::{quote_container, quote_style},
};

const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// Placeholder for a section whose data could not be fetched.
fn unavailable(title: &str) -> Markup {
    html! {
        p
            data-unavailable="true"
            class="rounded border border-dashed border-gray-300 px-4 py-6 text-center
                text-sm text-gray-500 dark:border-gray-700 dark:text-gray-400"
        {
            (title) " is unavailable right now. Refresh the page to try again."
        }
    }
}

fn section_view(title: &str, body: Markup) -> Markup {
    html! {
        section class="w-full space-y-4" data-section=(title)
        {
            h2 class="text-lg font-semibold" { (title) }
            (body)
        }
    }
}

/// Render a chart and table for `section`, or the placeholder if it failed.
///
/// Charts that are drawn are added to `charts`.
fn chart_section<T>(
    title: &str,
    section: &Section<Vec<T>>,
    id: &'static str,
    build_chart: impl FnOnce(&[T]) -> Chart,
    table: impl FnOnce(&[T]) -> Markup,
    charts: &mut Vec<AnalyticsChart>,
) -> Markup {
    let body = match section {
        Ok(rows) => {
            charts.push(AnalyticsChart {
                id,
                options: build_chart(rows).to_string(),
            });

            html! {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    (chart_container(id))
                    (table(rows))
                }
            }
        }
        Err(_) => unavailable(title),
    };

    section_view(title, body)
}

fn analytics_view(analytics: &Analytics, alerts: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW).into_html();
    let mut charts = Vec::new();

    let summary = match &analytics.summary {
        Ok(summary) => summary_cards(summary),
        Err(_) => unavailable("The summary"),
    };

    let sections = [
        chart_section(
            "Spending by Category",
            &analytics.categories,
            "category-chart",
            category_chart,
            category_table,
            &mut charts,
        ),
        chart_section(
            "Spending by Payment Source",
            &analytics.payment_sources,
            "payment-source-chart",
            payment_source_chart,
            payment_source_table,
            &mut charts,
        ),
        chart_section(
            "Daily Insights",
            &analytics.daily,
            "daily-chart",
            |rows: &[PeriodTotal]| period_chart("Daily Totals", rows),
            |rows: &[PeriodTotal]| period_table("Day", rows),
            &mut charts,
        ),
        chart_section(
            "Weekly Insights",
            &analytics.weekly,
            "weekly-chart",
            |rows: &[PeriodTotal]| period_chart("Weekly Totals", rows),
            |rows: &[PeriodTotal]| period_table("Week", rows),
            &mut charts,
        ),
        chart_section(
            "Monthly Insights",
            &analytics.monthly,
            "monthly-chart",
            |rows: &[PeriodTotal]| period_chart("Monthly Totals", rows),
            |rows: &[PeriodTotal]| period_table("Month", rows),
            &mut charts,
        ),
    ];

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-8"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Analytics" }

                    a
                        href=(endpoints::ANALYTICS_EXPORT)
                        download="analytics.csv"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Export CSV"
                    }
                }

                (summary)

                @for section in sections {
                    (section)
                }
            }
        }

        (quote_container())
    };

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&charts),
        quote_style(),
    ];

    base_with_alerts("Analytics", &head_elements, &content, alerts)
}

/// Display the backend's spending aggregates as cards, charts and tables.
pub async fn get_analytics_page(backend: Backend) -> Response {
    let analytics = fetch_analytics(&backend.client).await;

    backend.respond_page(|alerts| analytics_view(&analytics, alerts))
}
