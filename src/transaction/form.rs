//! The form fields shared by the create and edit transaction forms, and the
//! form data they submit.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    account::Account,
    database_id::AccountId,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::core::{Transaction, TransactionBuilder, TransactionType},
};

/// The form data for creating or updating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the money was earned or spent.
    pub type_: TransactionType,
    /// The magnitude of the transaction in dollars.
    pub amount: f64,
    /// The date when the transaction ocurred.
    pub date: Date,
    /// A free text label, e.g. "Groceries".
    pub category: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The account the money moved in or out of.
    #[serde(default)]
    pub account_id: Option<AccountId>,
}

impl TransactionForm {
    /// Convert the form into a builder. The builder has not been validated.
    pub fn into_builder(self) -> TransactionBuilder {
        Transaction::build(self.amount, self.type_, self.date)
            .category(&self.category)
            .description(self.description.as_deref())
            .account_id(self.account_id)
    }
}

/// The initial values of the form fields.
pub struct TransactionFormDefaults<'a> {
    pub transaction_type: TransactionType,
    pub amount: Option<f64>,
    pub date: Date,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub account_id: Option<AccountId>,
    pub autofocus_amount: bool,
}

pub fn transaction_form_fields(
    defaults: &TransactionFormDefaults<'_>,
    accounts: &[Account],
    known_categories: &[&str],
) -> Markup {
    let is_expense = matches!(defaults.transaction_type, TransactionType::Expense);
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));
    let amount_placeholder = amount_str.as_deref().unwrap_or("0.00");

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="type_"
                        id="transaction-type-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-type-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="type_"
                        id="transaction-type-income"
                        type="radio"
                        value="income"
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-type-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder=(amount_placeholder)
                    required
                    value=[amount_str.as_deref()]
                    autofocus[defaults.autofocus_amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            input
                name="category"
                id="category"
                type="text"
                placeholder="Groceries"
                list="category-options"
                value=[defaults.category]
                required
                class=(FORM_TEXT_INPUT_STYLE);

            datalist id="category-options"
            {
                @for category in known_categories {
                    option value=(category) {}
                }
            }
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        @if !accounts.is_empty() {
            div
            {
                label
                    for="account_id"
                    class=(FORM_LABEL_STYLE)
                {
                    "Account"
                }

                select
                    name="account_id"
                    id="account_id"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "No account" }

                    @for account in accounts {
                        option
                            value=(account.id)
                            selected[Some(account.id) == defaults.account_id]
                        {
                            (account.name)
                        }
                    }
                }
            }
        }
    }
}
