//! Defines the endpoint for creating a new account.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    account::{NewAccount, accounts_page::AccountState, form::AccountForm},
    auth::UserId,
    endpoints,
    stores::AccountStore,
};

/// A route handler for creating a new account, redirects to accounts view on success.
pub async fn create_account_endpoint(
    State(state): State<AccountState>,
    user_id: UserId,
    Form(form): Form<AccountForm>,
) -> Response {
    let new_account = match NewAccount::from(form).validate() {
        Ok(new_account) => new_account,
        Err(error) => {
            tracing::debug!("rejected account form from {user_id}: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.store.create_account(&user_id, new_account) {
        tracing::error!("could not create account for {user_id}: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
