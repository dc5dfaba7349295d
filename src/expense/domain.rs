//! Core expense domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, html::parse_iso_date};

/// The categories offered in the expense form.
pub const CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Entertainment",
    "Clothes",
    "Electronics",
    "Utilities",
    "Lend",
    "Others",
];

/// The payment sources offered in the expense form.
pub const PAYMENT_SOURCES: [&str; 7] = [
    "Credit Card",
    "Debit Card",
    "Cash",
    "UPI-Paytm",
    "UPI-GPay",
    "UPI-PhonePe",
    "UPI-Others",
];

/// The backend's identifier for an expense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense as returned by the backend.
///
/// `category` and `payment_source` are shown as-is even when they are not
/// one of [CATEGORIES] or [PAYMENT_SOURCES].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(alias = "_id")]
    pub id: ExpenseId,
    pub title: String,
    pub amount: f64,
    /// An ISO 8601 date, e.g. "2024-01-31".
    pub date: String,
    pub category: String,
    pub payment_source: String,
}

impl Expense {
    pub fn from_fields(id: ExpenseId, fields: ExpenseFields) -> Self {
        Self {
            id,
            title: fields.title,
            amount: fields.amount,
            date: fields.date,
            category: fields.category,
            payment_source: fields.payment_source,
        }
    }

    /// Everything but the ID, i.e. what the backend accepts on create and update.
    pub fn fields(&self) -> ExpenseFields {
        ExpenseFields {
            title: self.title.clone(),
            amount: self.amount,
            date: self.date.clone(),
            category: self.category.clone(),
            payment_source: self.payment_source.clone(),
        }
    }
}

/// The editable fields of an expense.
///
/// This is the request body for creating and updating expenses, and the
/// query string that carries an expense to the edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFields {
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub payment_source: String,
}

/// The raw text submitted from the expense form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFormData {
    pub title: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub payment_source: String,
}

impl ExpenseFormData {
    /// Convert the form text into fields the backend accepts.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if the amount is not a positive number.
    pub fn parse(&self) -> Result<ExpenseFields, Error> {
        Ok(ExpenseFields {
            title: self.title.trim().to_owned(),
            amount: parse_amount(&self.amount)?,
            date: self.date.clone(),
            category: self.category.clone(),
            payment_source: self.payment_source.clone(),
        })
    }
}

impl From<&Expense> for ExpenseFormData {
    fn from(expense: &Expense) -> Self {
        // Date inputs only accept "YYYY-MM-DD", not a full date-time.
        let date = match parse_iso_date(&expense.date) {
            Some(_) => expense.date[..10].to_owned(),
            None => expense.date.clone(),
        };

        Self {
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            date,
            category: expense.category.clone(),
            payment_source: expense.payment_source.clone(),
        }
    }
}

/// Parse the text of the amount input.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] if `text` is not a finite number greater than zero.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    let text = text.trim();

    match text.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}
