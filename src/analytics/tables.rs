//! Table and card views for the analytics page.

use maud::{Markup, html};

use crate::{
    analytics::models::{CategoryTotal, PaymentSourceCount, PeriodTotal, Summary, cell},
    html::{CARD_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
};

fn amount_cell(amount: Option<f64>) -> String {
    match amount {
        Some(amount) => format_currency(amount),
        None => "N/A".to_owned(),
    }
}

fn two_column_table(headers: [&str; 2], rows: Vec<[String; 2]>) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for header in headers {
                            th scope="col" class=(TABLE_CELL_STYLE) { (header) }
                        }
                    }
                }

                tbody
                {
                    @for [label, value] in rows {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (label) }
                            td class={(TABLE_CELL_STYLE) " tabular-nums"} { (value) }
                        }
                    }
                }
            }
        }
    }
}

/// The four summary cards at the top of the page.
pub(super) fn summary_cards(summary: &Summary) -> Markup {
    let cards = [
        (
            "Total Expenses",
            format_currency(summary.total_expenses.unwrap_or_default()),
        ),
        (
            "Total Categories",
            summary.total_categories.unwrap_or_default().to_string(),
        ),
        (
            "Most Spent Category",
            cell(summary.most_spent_category.as_ref()),
        ),
        (
            "Most Used Payment Source",
            cell(summary.most_used_payment_source.as_ref()),
        ),
    ];

    html! {
        div class="grid grid-cols-2 lg:grid-cols-4 gap-4 w-full"
        {
            @for (label, value) in cards {
                div class=(CARD_STYLE) data-summary-card="true"
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
                    p class="text-lg font-semibold" { (value) }
                }
            }
        }
    }
}

pub(super) fn category_table(categories: &[CategoryTotal]) -> Markup {
    let rows = categories
        .iter()
        .map(|row| [cell(row.category.as_ref()), amount_cell(row.total_amount)])
        .collect();

    two_column_table(["Category", "Total Amount"], rows)
}

pub(super) fn payment_source_table(payment_sources: &[PaymentSourceCount]) -> Markup {
    let rows = payment_sources
        .iter()
        .map(|row| [cell(row.payment_source.as_ref()), cell(row.count.as_ref())])
        .collect();

    two_column_table(["Payment Source", "Count"], rows)
}

/// A table of totals, where `period` names the first column, e.g. "Day".
pub(super) fn period_table(period: &str, totals: &[PeriodTotal]) -> Markup {
    let rows = totals
        .iter()
        .map(|row| [cell(row.period.as_ref()), amount_cell(row.total_amount)])
        .collect();

    two_column_table([period, "Total Amount"], rows)
}
