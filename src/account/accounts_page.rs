//! Displays accounts and the form for adding one.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    account::{Account, form::account_form_fields},
    auth::UserId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, dollar_input_styles, edit_delete_action_links, format_currency,
        loading_spinner,
    },
    navigation::NavBar,
    stores::{AccountStore, sqlite::SqliteStore},
};

/// The state needed for the account pages and endpoints.
#[derive(Debug, Clone)]
pub struct AccountState {
    /// The store for the user's accounts.
    pub store: SqliteStore,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Renders the page listing the user's accounts, newest first.
pub async fn get_accounts_page(
    State(state): State<AccountState>,
    user_id: UserId,
) -> Result<Response, Error> {
    let accounts = state
        .store
        .fetch_accounts(&user_id)
        .inspect_err(|error| tracing::error!("could not get accounts for {user_id}: {error}"))?;

    Ok(accounts_view(&accounts).into_response())
}

fn accounts_view(accounts: &[Account]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW).into_html();

    let table_row = |account: &Account| {
        let balance = account
            .balance
            .map(format_currency)
            .unwrap_or_else(|| "-".to_owned());
        let kind = account.kind.map(|kind| kind.label()).unwrap_or("");

        html!(
            tr class=(TABLE_ROW_STYLE) data-account-id=(account.id)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    (account.name)
                }

                td class=(TABLE_CELL_STYLE) { (kind) }

                td class="px-6 py-4 text-right" { (balance) }

                td class=(TABLE_CELL_STYLE)
                {
                    time datetime=(account.created_at.date()) { (account.created_at.date()) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    (edit_delete_action_links(
                        &format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account.id),
                        &format_endpoint(endpoints::ACCOUNT, account.id),
                        &format!(
                            "Are you sure you want to delete the account '{}'? \
                            Its transactions will be kept without an account.",
                            account.name
                        ),
                        "closest tr",
                        "delete",
                    ))
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl grid grid-cols-1 lg:grid-cols-3 gap-8"
            {
                section class="lg:col-span-1"
                {
                    (create_account_form())
                }

                section class="lg:col-span-2 space-y-4"
                {
                    h1 class="text-xl font-bold" { "Accounts" }

                    div class="overflow-x-auto rounded-lg shadow"
                    {
                        table
                            id="accounts-table"
                            class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                    th scope="col" class="px-6 py-3 text-right" { "Balance" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Created" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                                }
                            }

                            tbody
                            {
                                @for account in accounts {
                                    (table_row(account))
                                }

                                @if accounts.is_empty() {
                                    tr
                                    {
                                        td
                                            colspan="5"
                                            class="px-6 py-4 text-center
                                                text-gray-500 dark:text-gray-400"
                                        {
                                            "No accounts yet. Add one with the form."
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Accounts", &[dollar_input_styles()], &content)
}

fn create_account_form() -> Markup {
    html!(
        form
            id="create-account-form"
            hx-post=(endpoints::ACCOUNTS_API)
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            h2 class="text-xl font-bold" { "New Account" }

            (account_form_fields(None))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                " Add Account"
            }
        }
    )
}
