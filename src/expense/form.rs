//! The expense form, used both for adding new expenses and editing existing ones.
//!
//! The page has a single form slot, `#expense-form`. Loading an edit form
//! replaces whatever form is in the slot.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    expense::{CATEGORIES, Expense, ExpenseFormData, ExpenseId, PAYMENT_SOURCES},
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The ID of the element that holds the expense form.
pub const EXPENSE_FORM_ID: &str = "expense-form";

/// Whether the form creates a new expense or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ExpenseId),
}

impl From<Option<&Expense>> for FormMode {
    fn from(seed: Option<&Expense>) -> Self {
        match seed {
            Some(expense) => FormMode::Edit(expense.id.clone()),
            None => FormMode::Create,
        }
    }
}

/// Builder for the expense form.
#[derive(Debug, Clone)]
pub struct ExpenseForm<'a> {
    mode: FormMode,
    values: ExpenseFormData,
    error_message: Option<&'a str>,
    out_of_band: bool,
}

impl<'a> ExpenseForm<'a> {
    /// A form for editing `seed`, or a blank form for a new expense when
    /// `seed` is `None`.
    pub fn new(seed: Option<&Expense>) -> Self {
        Self {
            mode: FormMode::from(seed),
            values: seed.map(ExpenseFormData::from).unwrap_or_default(),
            error_message: None,
            out_of_band: false,
        }
    }

    pub fn with_mode(mut self, mode: FormMode) -> Self {
        self.mode = mode;
        self
    }

    /// Fill the inputs with text the user already entered.
    pub fn with_values(mut self, values: ExpenseFormData) -> Self {
        self.values = values;
        self
    }

    pub fn with_error(mut self, error_message: &'a str) -> Self {
        self.error_message = Some(error_message);
        self
    }

    /// Render the form as an out-of-band swap that replaces the form slot.
    pub fn out_of_band(mut self) -> Self {
        self.out_of_band = true;
        self
    }

    pub fn into_html(self) -> Markup {
        let (heading, submit_text) = match &self.mode {
            FormMode::Create => ("Add Expense", "Add Expense"),
            FormMode::Edit(_) => ("Edit Expense", "Update Expense"),
        };
        let (hx_post, hx_put) = match &self.mode {
            FormMode::Create => (Some(endpoints::EXPENSES_API.to_owned()), None),
            FormMode::Edit(id) => (None, Some(format_endpoint(endpoints::EXPENSE_API, id))),
        };
        let values = &self.values;

        html! {
            div
                id=(EXPENSE_FORM_ID)
                hx-swap-oob=[self.out_of_band.then_some("true")]
                class="w-full max-w-md p-6 bg-white rounded-lg shadow dark:bg-gray-800"
            {
                h2 class="mb-4 text-lg font-semibold" { (heading) }

                form
                    hx-post=[hx_post]
                    hx-put=[hx_put]
                    hx-target="#expense-list"
                    hx-swap="innerHTML"
                    hx-target-error="#alert-container"
                    hx-disabled-elt="find button[type=submit]"
                    class="space-y-4"
                {
                    div
                    {
                        label for="title" class=(FORM_LABEL_STYLE) { "Title" }
                        input
                            id="title"
                            type="text"
                            name="title"
                            value=(values.title)
                            placeholder="Coffee"
                            class=(FORM_TEXT_INPUT_STYLE)
                            required;
                    }

                    div
                    {
                        label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                        input
                            id="amount"
                            type="text"
                            inputmode="decimal"
                            name="amount"
                            value=(values.amount)
                            placeholder="0.00"
                            class=(FORM_TEXT_INPUT_STYLE)
                            required
                            autofocus[self.error_message.is_some()];

                        @if let Some(error_message) = self.error_message {
                            p class="text-red-500 text-base" { (error_message) }
                        }
                    }

                    div
                    {
                        label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                        input
                            id="date"
                            type="date"
                            name="date"
                            value=(values.date)
                            class=(FORM_TEXT_INPUT_STYLE)
                            required;
                    }

                    (select_input("category", "Category", &CATEGORIES, &values.category))

                    (select_input(
                        "payment_source",
                        "Payment Source",
                        &PAYMENT_SOURCES,
                        &values.payment_source
                    ))

                    div class="flex gap-2"
                    {
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }

                        @if matches!(self.mode, FormMode::Edit(_)) {
                            button
                                type="button"
                                hx-get=(endpoints::NEW_EXPENSE_VIEW)
                                hx-target={"#" (EXPENSE_FORM_ID)}
                                hx-swap="outerHTML"
                                class=(BUTTON_SECONDARY_STYLE)
                            {
                                "Cancel"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// A select that starts on an empty placeholder until a value is chosen.
///
/// A `selected` value that is not one of `options` is kept as an extra
/// option so that editing an expense does not silently change it.
fn select_input(name: &str, label: &str, options: &[&str], selected: &str) -> Markup {
    let is_unknown = !selected.is_empty() && !options.contains(&selected);

    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }
            select id=(name) name=(name) class=(FORM_TEXT_INPUT_STYLE) required
            {
                option value="" disabled selected[selected.is_empty()] { "Select " (label.to_lowercase()) }

                @for option in options {
                    option value=(option) selected[*option == selected] { (option) }
                }

                @if is_unknown {
                    option value=(selected) selected { (selected) }
                }
            }
        }
    }
}
