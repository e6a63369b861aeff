//! Defines the route handler for the page for editing an account.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    account::{accounts_page::AccountState, form::account_form_fields},
    auth::UserId,
    database_id::AccountId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, dollar_input_styles,
        loading_spinner,
    },
    navigation::NavBar,
    stores::AccountStore,
};

/// Renders the page for editing an account's name, type and balance.
pub async fn get_edit_account_page(
    State(state): State<AccountState>,
    user_id: UserId,
    Path(account_id): Path<AccountId>,
) -> Result<Response, Error> {
    let account = state
        .store
        .get_account(&user_id, account_id)
        .inspect_err(|error| {
            if *error != Error::NotFound {
                tracing::error!("could not get account {account_id}: {error}");
            }
        })?;

    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW).into_html();
    let update_url = format_endpoint(endpoints::ACCOUNT, account_id);

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_url)
                hx-target-error="#alert-container"
                class="w-full max-w-md space-y-4"
            {
                h2 class="text-xl font-bold" { "Edit Account" }

                (account_form_fields(Some(&account)))

                button
                    type="submit"
                    id="submit-button"
                    tabindex="0"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                    " Save Account"
                }

                a href=(endpoints::ACCOUNTS_VIEW) class=(LINK_STYLE) { "Back to accounts" }
            }
        }
    );

    Ok(base("Edit Account", &[dollar_input_styles()], &content).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        account::{AccountType, NewAccount, accounts_page::AccountState},
        auth::UserId,
        stores::{AccountStore, sqlite::SqliteStore},
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_status_ok,
            assert_valid_html, must_get_form, parse_html_document,
        },
    };

    use super::get_edit_account_page;

    fn get_test_state() -> AccountState {
        AccountState {
            store: SqliteStore::new(Connection::open_in_memory().unwrap()).unwrap(),
        }
    }

    #[tokio::test]
    async fn prefills_form_with_account() {
        let state = get_test_state();
        let user_id = UserId::new("alice");
        let account = state
            .store
            .create_account(
                &user_id,
                NewAccount {
                    name: "Rainy Day".to_owned(),
                    kind: Some(AccountType::Savings),
                    balance: Some(2500.75),
                },
            )
            .unwrap();

        let response = get_edit_account_page(State(state), user_id, Path(account.id))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, &format!("/api/accounts/{}", account.id), "hx-put");
        assert_form_input(&form, "name", "text");
        assert_form_submit_button(&form);
        let name = Selector::parse("input[name=name]").unwrap();
        assert_eq!(
            html.select(&name).next().unwrap().value().attr("value"),
            Some("Rainy Day")
        );
        let selected = Selector::parse("select[name=type] option[selected]").unwrap();
        assert_eq!(
            html.select(&selected).next().unwrap().value().attr("value"),
            Some("savings")
        );
    }

    #[tokio::test]
    async fn other_users_account_is_not_found() {
        let state = get_test_state();
        let account = state
            .store
            .create_account(
                &UserId::new("bob"),
                NewAccount {
                    name: "Everyday".to_owned(),
                    kind: None,
                    balance: None,
                },
            )
            .unwrap();

        let error = get_edit_account_page(State(state), UserId::new("alice"), Path(account.id))
            .await
            .unwrap_err();

        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
