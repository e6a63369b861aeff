//! Defines the endpoint for updating an existing account.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    account::{NewAccount, accounts_page::AccountState, form::AccountForm},
    auth::UserId,
    database_id::AccountId,
    endpoints,
    stores::AccountStore,
};

/// A route handler for replacing the name, type and balance of an account,
/// redirects to the accounts view on success.
pub async fn edit_account_endpoint(
    State(state): State<AccountState>,
    user_id: UserId,
    Path(account_id): Path<AccountId>,
    Form(form): Form<AccountForm>,
) -> Response {
    let account = match NewAccount::from(form).validate() {
        Ok(account) => account,
        Err(error) => {
            tracing::debug!("rejected account form from {user_id}: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.store.update_account(&user_id, account_id, account) {
        tracing::error!("could not update account {account_id}: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
