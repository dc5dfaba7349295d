//! Editing existing expenses.

use axum::{
    Form,
    extract::{FromRef, Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState,
    alert::Alert,
    api::Backend,
    expense::{
        Expense, ExpenseFields, ExpenseFormData, ExpenseId, InFlightMutations,
        form::{ExpenseForm, FormMode},
        page::{invalid_form_response, respond_with_fresh_list},
        update_expense,
    },
};

/// The state needed to update or delete an expense.
#[derive(Debug, Clone)]
pub struct ExpenseMutationState {
    pub in_flight: InFlightMutations,
}

impl FromRef<AppState> for ExpenseMutationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            in_flight: state.in_flight.clone(),
        }
    }
}

/// The form in edit mode, populated from the expense carried in the query string.
pub async fn get_edit_expense_form(
    Path(expense_id): Path<ExpenseId>,
    query: Result<Query<ExpenseFields>, QueryRejection>,
) -> Response {
    let Query(fields) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::warn!("Could not read expense {expense_id} from the query: {rejection}");
            return (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not edit expense".to_owned(),
                    details: "The expense details were missing. Refresh the page and try again."
                        .to_owned(),
                }
                .into_html(),
            )
                .into_response();
        }
    };

    let expense = Expense::from_fields(expense_id, fields);

    ExpenseForm::new(Some(&expense)).into_html().into_response()
}

/// Replace the expense and respond with the refreshed list.
///
/// The edit form stays populated on success.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseMutationState>,
    Path(expense_id): Path<ExpenseId>,
    backend: Backend,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    let fields = match form.parse() {
        Ok(fields) => fields,
        Err(error) => {
            let form_view = ExpenseForm::new(None)
                .with_mode(FormMode::Edit(expense_id))
                .with_values(form);
            return invalid_form_response(form_view, &error);
        }
    };

    let guard = match state.in_flight.begin(&expense_id) {
        Ok(guard) => guard,
        Err(error) => return backend.respond_with(error.into_alert_response()),
    };

    let result = update_expense(&backend.client, &expense_id, &fields).await;
    drop(guard);

    if let Err(error) = result {
        tracing::error!("Could not update expense {expense_id}: {error}");
        return backend.respond_alert(
            error.status_code(),
            Alert::ErrorSimple {
                message: "Failed to update expense. Please try again.".to_owned(),
            },
        );
    }

    respond_with_fresh_list(
        backend,
        Alert::SuccessSimple {
            message: "Expense updated successfully!".to_owned(),
        },
        html! {},
    )
    .await
}
