//! The list of expenses with a summary of the user's spending.

use std::collections::HashSet;

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    expense::Expense,
    html::{
        BUTTON_DELETE_STYLE, CARD_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, format_date,
    },
};

/// The ID of the element that mutations swap the refreshed list into.
pub const EXPENSE_LIST_ID: &str = "expense-list";

pub const EMPTY_LIST_MESSAGE: &str = "No expenses found. Start by adding a new expense.";

/// Totals shown above the list, computed from the expenses as displayed.
#[derive(Debug, PartialEq)]
struct ExpenseSummary<'a> {
    total: f64,
    count: usize,
    categories: usize,
    /// The first expense in backend order.
    last: Option<&'a Expense>,
}

impl<'a> ExpenseSummary<'a> {
    fn new(expenses: &'a [Expense]) -> Self {
        Self {
            total: expenses.iter().map(|expense| expense.amount).sum(),
            count: expenses.len(),
            categories: expenses
                .iter()
                .map(|expense| expense.category.as_str())
                .collect::<HashSet<_>>()
                .len(),
            last: expenses.first(),
        }
    }
}

/// The URL for the edit form, carrying the whole expense in the query string.
fn edit_url(expense: &Expense) -> String {
    let path = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, &expense.id);

    match serde_urlencoded::to_string(expense.fields()) {
        Ok(query) => format!("{path}?{query}"),
        Err(error) => {
            tracing::error!("Could not encode expense {} for editing: {error}", expense.id);
            path
        }
    }
}

fn summary_card(label: &str, value: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) data-summary-card="true"
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="text-lg font-semibold tabular-nums" { (value) }
        }
    }
}

fn summary_view(summary: &ExpenseSummary) -> Markup {
    let last_transaction = match summary.last {
        Some(expense) => format!("{} ({})", expense.title, format_currency(expense.amount)),
        None => "N/A".to_owned(),
    };

    html! {
        div class="grid grid-cols-2 lg:grid-cols-4 gap-4 w-full"
        {
            (summary_card("Total Expenses", &format_currency(summary.total)))
            (summary_card("Total Transactions", &summary.count.to_string()))
            (summary_card("Categories Used", &summary.categories.to_string()))
            (summary_card("Last Transaction", &last_transaction))
        }
    }
}

fn action_buttons(expense: &Expense) -> Markup {
    let delete_url = format_endpoint(endpoints::EXPENSE_API, &expense.id);
    let confirm_message = format!("Are you sure you want to delete '{}'?", expense.title);

    html! {
        div class="flex gap-4"
        {
            button
                type="button"
                hx-get=(edit_url(expense))
                hx-target="#expense-form"
                hx-swap="outerHTML"
                class=(LINK_STYLE)
                data-action="edit"
            {
                "Edit"
            }

            button
                type="button"
                hx-delete=(delete_url)
                hx-confirm=(confirm_message)
                hx-target={"#" (EXPENSE_LIST_ID)}
                hx-swap="innerHTML"
                hx-target-error="#alert-container"
                class=(BUTTON_DELETE_STYLE)
                data-action="delete"
            {
                "Delete"
            }
        }
    }
}

fn table_view(expenses: &[Expense]) -> Markup {
    html! {
        div class="hidden lg:block w-full dark:bg-gray-800"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Payment Source" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        tr class=(TABLE_ROW_STYLE) data-expense-row=(expense.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (expense.title) }
                            td class={(TABLE_CELL_STYLE) " tabular-nums"} { (format_currency(expense.amount)) }
                            td class=(TABLE_CELL_STYLE) { (format_date(&expense.date)) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                            }
                            td class=(TABLE_CELL_STYLE) { (expense.payment_source) }
                            td class=(TABLE_CELL_STYLE) { (action_buttons(expense)) }
                        }
                    }

                    @if expenses.is_empty() {
                        tr
                        {
                            td
                                colspan="6"
                                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                            {
                                (EMPTY_LIST_MESSAGE)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn cards_view(expenses: &[Expense]) -> Markup {
    html! {
        ul class="lg:hidden space-y-4 w-full"
        {
            @for expense in expenses {
                li class=(CARD_STYLE) data-expense-card=(expense.id)
                {
                    div class="flex items-start justify-between gap-3"
                    {
                        span class="font-semibold" { (expense.title) }
                        span class="tabular-nums" { (format_currency(expense.amount)) }
                    }

                    div class="mt-1 flex flex-wrap gap-2 text-sm text-gray-500 dark:text-gray-400"
                    {
                        span { (format_date(&expense.date)) }
                        span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                        span { (expense.payment_source) }
                    }

                    div class="mt-2 text-sm" { (action_buttons(expense)) }
                }
            }

            @if expenses.is_empty() {
                li class="rounded border border-dashed border-gray-300 bg-white px-4 py-6 text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400"
                {
                    (EMPTY_LIST_MESSAGE)
                }
            }
        }
    }
}

/// The contents of the list section: the summary cards and the expenses.
///
/// Mutations respond with this markup, which htmx swaps into the
/// `#expense-list` element.
pub fn expense_list_view(expenses: &[Expense]) -> Markup {
    let summary = ExpenseSummary::new(expenses);

    html! {
        (summary_view(&summary))
        (table_view(expenses))
        (cards_view(expenses))
    }
}

/// The list section as placed on the expenses page.
pub fn expense_list_section(expenses: &[Expense]) -> Markup {
    html! {
        section id=(EXPENSE_LIST_ID) class="w-full space-y-4"
        {
            (expense_list_view(expenses))
        }
    }
}
