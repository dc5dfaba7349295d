//! Expense management: the expenses page, the dual-mode form, the list and
//! the endpoints that change expenses.
//!
//! Every successful change is followed by exactly one fresh fetch of the
//! list, which is what the browser then shows.

mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod in_flight;
mod list;
mod page;
mod requests;

pub use create::{create_expense_endpoint, get_new_expense_form};
pub use delete::delete_expense_endpoint;
pub use domain::{
    CATEGORIES, Expense, ExpenseFields, ExpenseFormData, ExpenseId, PAYMENT_SOURCES, parse_amount,
};
pub use edit::{ExpenseMutationState, get_edit_expense_form, update_expense_endpoint};
pub use in_flight::{InFlightGuard, InFlightMutations};
pub use page::get_expenses_page;
pub use requests::{create_expense, delete_expense, list_expenses, update_expense};
