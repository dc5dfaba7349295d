//! Downloading the analytics tables as a CSV file.

use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use csv::{Terminator, WriterBuilder};

use crate::{
    Error,
    analytics::{
        fetch::{Analytics, fetch_analytics},
        models::cell,
    },
    api::Backend,
};

/// One block of the CSV file: a title line, a header line and the rows.
struct CsvSection<'a> {
    title: &'a str,
    columns: [&'a str; 2],
    rows: Vec<[String; 2]>,
}

fn sections(analytics: &Analytics) -> Vec<CsvSection<'static>> {
    let mut sections = Vec::new();

    if let Ok(daily) = &analytics.daily {
        sections.push(CsvSection {
            title: "Daily Totals",
            columns: ["day", "totalAmount"],
            rows: daily
                .iter()
                .map(|row| [cell(row.period.as_ref()), cell(row.total_amount.as_ref())])
                .collect(),
        });
    }

    if let Ok(weekly) = &analytics.weekly {
        sections.push(CsvSection {
            title: "Weekly Totals",
            columns: ["week", "totalAmount"],
            rows: weekly
                .iter()
                .map(|row| [cell(row.period.as_ref()), cell(row.total_amount.as_ref())])
                .collect(),
        });
    }

    if let Ok(categories) = &analytics.categories {
        sections.push(CsvSection {
            title: "Category Wise Totals",
            columns: ["category", "totalAmount"],
            rows: categories
                .iter()
                .map(|row| [cell(row.category.as_ref()), cell(row.total_amount.as_ref())])
                .collect(),
        });
    }

    if let Ok(payment_sources) = &analytics.payment_sources {
        sections.push(CsvSection {
            title: "Payment Source Distribution",
            columns: ["paymentSource", "count"],
            rows: payment_sources
                .iter()
                .map(|row| [cell(row.payment_source.as_ref()), cell(row.count.as_ref())])
                .collect(),
        });
    }

    sections
}

/// Write the non-empty sections, each followed by a blank line.
///
/// # Errors
///
/// Returns [Error::CsvError] if a record could not be written.
fn write_csv(sections: &[CsvSection]) -> Result<Vec<u8>, Error> {
    let mut output = Vec::new();

    for section in sections.iter().filter(|section| !section.rows.is_empty()) {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record([section.title])
            .and_then(|_| writer.write_record(section.columns))
            .map_err(|error| Error::CsvError(error.to_string()))?;

        for row in &section.rows {
            writer
                .write_record(row)
                .map_err(|error| Error::CsvError(error.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|error| Error::CsvError(error.to_string()))?;
        output.extend(bytes);
        output.push(b'\n');
    }

    Ok(output)
}

/// Download the daily, weekly, category and payment source tables as `analytics.csv`.
pub async fn export_analytics(backend: Backend) -> Response {
    let analytics = fetch_analytics(&backend.client).await;

    match write_csv(&sections(&analytics)) {
        Ok(csv) => backend.respond_with((
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8"),
                (CONTENT_DISPOSITION, "attachment; filename=\"analytics.csv\""),
            ],
            csv,
        )),
        Err(error) => {
            tracing::error!("Could not export analytics: {error}");
            backend.respond_with(error.into_alert_response())
        }
    }
}
