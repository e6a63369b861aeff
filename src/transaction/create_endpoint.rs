//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    auth::UserId,
    endpoints,
    stores::{TransactionStore, sqlite::SqliteStore},
    transaction::form::TransactionForm,
};

/// The state needed by the endpoints that create, update or delete a transaction.
#[derive(Debug, Clone)]
pub struct TransactionEndpointState {
    /// The store for the user's transactions.
    pub store: SqliteStore,
}

impl FromRef<AppState> for TransactionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    user_id: UserId,
    Form(form): Form<TransactionForm>,
) -> Response {
    let builder = match form.into_builder().validate() {
        Ok(builder) => builder,
        Err(error) => {
            tracing::debug!("rejected transaction form from {user_id}: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state.store.create_transaction(&user_id, builder) {
        tracing::error!("could not create transaction for {user_id}: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        account::NewAccount,
        auth::UserId,
        endpoints,
        stores::{AccountStore, TransactionStore, sqlite::SqliteStore},
        test_utils::assert_hx_redirect,
        transaction::{core::TransactionType, form::TransactionForm},
    };

    use super::{TransactionEndpointState, create_transaction_endpoint};

    fn get_test_state() -> TransactionEndpointState {
        TransactionEndpointState {
            store: SqliteStore::new(Connection::open_in_memory().unwrap()).unwrap(),
        }
    }

    fn form(amount: f64, category: &str) -> TransactionForm {
        TransactionForm {
            type_: TransactionType::Expense,
            amount,
            date: date!(2024 - 08 - 01),
            category: category.to_owned(),
            description: Some("Weekly shop".to_owned()),
            account_id: None,
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();
        let user_id = UserId::new("alice");

        let response = create_transaction_endpoint(
            State(state.clone()),
            user_id.clone(),
            Form(form(12.3, "  Groceries ")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);

        let records = state.store.fetch_transactions(&user_id).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category.as_deref(), Some("Groceries"));
        assert_eq!(records[0].kind.as_deref(), Some("expense"));
        assert_eq!(records[0].date.as_deref(), Some("2024-08-01"));
    }

    #[tokio::test]
    async fn rejects_negative_amount() {
        let state = get_test_state();
        let user_id = UserId::new("alice");

        let response = create_transaction_endpoint(
            State(state.clone()),
            user_id.clone(),
            Form(form(-5.0, "Groceries")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.store.fetch_transactions(&user_id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_blank_category() {
        let state = get_test_state();
        let user_id = UserId::new("alice");

        let response = create_transaction_endpoint(
            State(state.clone()),
            user_id.clone(),
            Form(form(12.3, "   ")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.store.fetch_transactions(&user_id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_another_users_account() {
        let state = get_test_state();
        let account = state
            .store
            .create_account(
                &UserId::new("bob"),
                NewAccount {
                    name: "Bob's".to_owned(),
                    kind: None,
                    balance: None,
                },
            )
            .unwrap();
        let mut form = form(12.3, "Groceries");
        form.account_id = Some(account.id);

        let response =
            create_transaction_endpoint(State(state.clone()), UserId::new("alice"), Form(form))
                .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
