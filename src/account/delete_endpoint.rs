//! Defines the endpoint for deleting an account.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    account::accounts_page::AccountState, alert::Alert, auth::UserId, database_id::AccountId,
    stores::AccountStore,
};

/// A route handler for deleting an account, responds with an alert.
///
/// Transactions that referred to the account are kept.
pub async fn delete_account_endpoint(
    State(state): State<AccountState>,
    user_id: UserId,
    Path(account_id): Path<AccountId>,
) -> Response {
    match state.store.delete_account(&user_id, account_id) {
        Ok(()) => Alert::SuccessSimple {
            message: "Account deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}
