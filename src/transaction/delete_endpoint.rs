//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, auth::UserId, database_id::TransactionId, stores::TransactionStore,
    transaction::create_endpoint::TransactionEndpointState,
};

/// A route handler for deleting a transaction, responds with an alert.
///
/// The status code has to be 200 OK on success or HTMX will not remove the
/// table row.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    user_id: UserId,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.store.delete_transaction(&user_id, transaction_id) {
        Ok(()) => Alert::SuccessSimple {
            message: "Transaction deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        Error,
        auth::UserId,
        stores::{TransactionStore, sqlite::SqliteStore},
        test_utils::parse_html_fragment,
        transaction::{
            core::{Transaction, TransactionType},
            create_endpoint::TransactionEndpointState,
        },
    };

    use super::delete_transaction_endpoint;

    fn get_test_state() -> TransactionEndpointState {
        TransactionEndpointState {
            store: SqliteStore::new(Connection::open_in_memory().unwrap()).unwrap(),
        }
    }

    fn create_groceries(state: &TransactionEndpointState, user_id: &UserId) -> Transaction {
        state
            .store
            .create_transaction(
                user_id,
                Transaction::build(12.3, TransactionType::Expense, date!(2024 - 08 - 01))
                    .category("Groceries"),
            )
            .unwrap()
    }

    #[tokio::test]
    async fn can_delete_transaction() {
        let state = get_test_state();
        let user_id = UserId::new("alice");
        let transaction = create_groceries(&state, &user_id);

        let response = delete_transaction_endpoint(
            State(state.clone()),
            user_id.clone(),
            Path(transaction.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let message = Selector::parse("#alert-container p").unwrap();
        let text = html
            .select(&message)
            .next()
            .expect("alert message missing")
            .text()
            .collect::<String>();
        assert_eq!(text, "Transaction deleted successfully");
        assert_eq!(
            state.store.get_transaction(&user_id, transaction.id),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn deleting_missing_transaction_is_not_found() {
        let state = get_test_state();

        let response =
            delete_transaction_endpoint(State(state), UserId::new("alice"), Path(1337)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cannot_delete_other_users_transaction() {
        let state = get_test_state();
        let transaction = create_groceries(&state, &UserId::new("bob"));

        let response = delete_transaction_endpoint(
            State(state.clone()),
            UserId::new("alice"),
            Path(transaction.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(
            state
                .store
                .get_transaction(&UserId::new("bob"), transaction.id)
                .is_ok()
        );
    }
}
