//! Deleting an expense, then re-listing.

use axum::{
    extract::{Path, State},
    response::Response,
};
use maud::html;

use crate::{
    alert::Alert,
    api::Backend,
    expense::{
        ExpenseId, delete_expense, edit::ExpenseMutationState, page::respond_with_fresh_list,
    },
};

/// Delete the expense and respond with the refreshed list.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseMutationState>,
    Path(expense_id): Path<ExpenseId>,
    backend: Backend,
) -> Response {
    let guard = match state.in_flight.begin(&expense_id) {
        Ok(guard) => guard,
        Err(error) => return backend.respond_with(error.into_alert_response()),
    };

    let result = delete_expense(&backend.client, &expense_id).await;
    drop(guard);

    if let Err(error) = result {
        tracing::error!("Could not delete expense {expense_id}: {error}");
        return backend.respond_alert(
            error.status_code(),
            Alert::ErrorSimple {
                message: "Failed to delete expense. Please try again.".to_owned(),
            },
        );
    }

    respond_with_fresh_list(
        backend,
        Alert::SuccessSimple {
            message: "Expense deleted successfully!".to_owned(),
        },
        html! {},
    )
    .await
}
