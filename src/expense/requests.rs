//! The expense calls to the backend.

use crate::{
    api::{ApiClient, ApiError, BACKEND_EXPENSE, BACKEND_EXPENSES},
    endpoints::format_endpoint,
    expense::{Expense, ExpenseFields, ExpenseId},
};

/// Fetch all of the user's expenses, in the order the backend returns them.
pub async fn list_expenses(client: &ApiClient) -> Result<Vec<Expense>, ApiError> {
    client.get(BACKEND_EXPENSES).await
}

pub async fn create_expense(client: &ApiClient, fields: &ExpenseFields) -> Result<(), ApiError> {
    client.post(BACKEND_EXPENSES, fields).await
}

/// Replace every field of the expense `id` with `fields`.
pub async fn update_expense(
    client: &ApiClient,
    id: &ExpenseId,
    fields: &ExpenseFields,
) -> Result<(), ApiError> {
    client.put(&format_endpoint(BACKEND_EXPENSE, id), fields).await
}

pub async fn delete_expense(client: &ApiClient, id: &ExpenseId) -> Result<(), ApiError> {
    client.delete(&format_endpoint(BACKEND_EXPENSE, id)).await
}
