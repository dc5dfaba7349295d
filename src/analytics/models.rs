//! The aggregates returned by the backend's analytics endpoints.
//!
//! Every field is optional. The backend computes these and may leave any of
//! them out, which the page shows as "N/A".

use std::fmt::Display;

use serde::Deserialize;

/// The `{data: ...}` wrapper around every analytics response.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// The label of a daily, weekly or monthly total.
///
/// Days and months are usually strings, weeks may be plain numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PeriodLabel {
    Text(String),
    Number(f64),
}

impl Display for PeriodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodLabel::Text(text) => write!(f, "{text}"),
            PeriodLabel::Number(number) => write!(f, "{number}"),
        }
    }
}

/// The total spent in one day, week or month.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotal {
    #[serde(alias = "day", alias = "week", alias = "month")]
    pub period: Option<PeriodLabel>,
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_expenses: Option<f64>,
    pub total_categories: Option<u64>,
    pub most_spent_category: Option<String>,
    pub most_used_payment_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Option<String>,
    pub total_amount: Option<f64>,
}

/// How many expenses were paid with a payment source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSourceCount {
    pub payment_source: Option<String>,
    pub count: Option<u64>,
}

/// Text for a table or CSV cell, "N/A" when the value is missing.
pub(super) fn cell<T: Display>(value: Option<&T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "N/A".to_owned(),
    }
}
