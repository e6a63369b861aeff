//! The form fields shared by the create and edit account forms, and the form
//! data they submit.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    account::{Account, AccountType, NewAccount},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The form data for creating or updating an account.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// The name of the account.
    pub name: String,
    /// The kind of account.
    #[serde(rename = "type", default)]
    pub kind: Option<AccountType>,
    /// The balance in dollars.
    #[serde(default)]
    pub balance: Option<f64>,
}

impl From<AccountForm> for NewAccount {
    fn from(form: AccountForm) -> Self {
        NewAccount {
            name: form.name,
            kind: form.kind,
            balance: form.balance,
        }
    }
}

/// The name, type and balance inputs, filled in from `account` when editing.
pub fn account_form_fields(account: Option<&Account>) -> Markup {
    let name = account.map(|account| account.name.as_str());
    let kind = account.and_then(|account| account.kind);
    let balance = account
        .and_then(|account| account.balance)
        .map(|balance| format!("{balance:.2}"));

    html! {
        div
        {
            label for="name" class=(FORM_LABEL_STYLE) { "Name" }

            input
                name="name"
                id="name"
                type="text"
                placeholder="Everyday"
                value=[name]
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="type" class=(FORM_LABEL_STYLE) { "Type" }

            select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[kind.is_none()] { "Not set" }

                @for choice in AccountType::ALL {
                    option value=(choice.as_str()) selected[kind == Some(choice)] {
                        (choice.label())
                    }
                }
            }
        }

        div
        {
            label for="balance" class=(FORM_LABEL_STYLE) { "Balance" }

            div class="input-wrapper w-full"
            {
                input
                    name="balance"
                    id="balance"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    value=[balance]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}
