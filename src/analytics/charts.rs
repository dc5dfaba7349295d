//! ECharts visualizations for the analytics page.
//!
//! Charts are built with charming, serialized to JSON and initialized by a
//! small script once the page has loaded. Rows with a missing label or value
//! are left out of the charts; the tables next to them still list them.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Orient, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    analytics::models::{CategoryTotal, PaymentSourceCount, PeriodTotal},
    html::HeadElement,
};

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct AnalyticsChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// The element the chart `id` is drawn into.
pub(super) fn chart_container(id: &str) -> Markup {
    html!(
        div
            id=(id)
            data-chart="true"
            class="min-h-[320px] w-full rounded dark:bg-gray-100"
        {}
    )
}

/// JavaScript that draws `charts`, follows the system dark mode and resizes
/// with the window.
pub(super) fn charts_script(charts: &[AnalyticsChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) return;
                    const chart = echarts.init(chartDom);
                    chart.setOption({});

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    HeadElement::ScriptSource(PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    )))
}

/// Share of spending per category.
pub(super) fn category_chart(categories: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, String)> = categories
        .iter()
        .filter_map(|row| Some((row.total_amount?, row.category.clone()?)))
        .collect();

    Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().orient(Orient::Vertical).left("left").top("15%"))
        .series(
            Pie::new()
                .name("Total Amount")
                .radius(vec!["35%", "65%"])
                .center(vec!["60%", "55%"])
                .data(data),
        )
}

/// Number of expenses per payment source.
pub(super) fn payment_source_chart(payment_sources: &[PaymentSourceCount]) -> Chart {
    let (labels, counts): (Vec<String>, Vec<f64>) = payment_sources
        .iter()
        .filter_map(|row| Some((row.payment_source.clone()?, row.count? as f64)))
        .unzip();

    Chart::new()
        .title(Title::new().text("Spending by Payment Source"))
        .tooltip(axis_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Count").data(counts))
}

/// Total spent over time, one point per day, week or month.
pub(super) fn period_chart(title: &str, totals: &[PeriodTotal]) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = totals
        .iter()
        .filter_map(|row| Some((row.period.as_ref()?.to_string(), row.total_amount?)))
        .unzip();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(axis_tooltip().value_formatter(currency_formatter()))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Total Amount").data(values))
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .contain_label(true)
}

fn axis_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
