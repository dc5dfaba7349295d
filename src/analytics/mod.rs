//! Analytics page: summary cards, charts and tables of the aggregates the
//! backend computes, plus a CSV export of the tables.
//!
//! The six aggregates are fetched concurrently. Each one fills its own
//! section, so a failing endpoint only blanks out that section.

mod charts;
mod export;
mod fetch;
mod models;
mod page;
mod tables;

pub use export::export_analytics;
pub use fetch::{Analytics, Section, fetch_analytics};
pub use models::{CategoryTotal, PaymentSourceCount, PeriodLabel, PeriodTotal, Summary};
pub use page::get_analytics_page;
