//! Defines the endpoint for updating an existing transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    auth::UserId,
    database_id::TransactionId,
    endpoints,
    stores::TransactionStore,
    transaction::{create_endpoint::TransactionEndpointState, form::TransactionForm},
};

/// A route handler for replacing the fields of a transaction, redirects to
/// the transactions view on success.
///
/// Saving a record that could not be read replaces its bad fields, which is
/// how malformed records get fixed.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionEndpointState>,
    user_id: UserId,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let builder = match form.into_builder().validate() {
        Ok(builder) => builder,
        Err(error) => {
            tracing::debug!("rejected transaction form from {user_id}: {error}");
            return error.into_alert_response();
        }
    };

    if let Err(error) = state
        .store
        .update_transaction(&user_id, transaction_id, builder)
    {
        tracing::error!("could not update transaction {transaction_id}: {error}");
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
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        auth::UserId,
        endpoints,
        stores::{TransactionStore, sqlite::SqliteStore},
        test_utils::assert_hx_redirect,
        transaction::{
            core::{Transaction, TransactionType, parse_records},
            create_endpoint::TransactionEndpointState,
            form::TransactionForm,
        },
    };

    use super::edit_transaction_endpoint;

    fn get_test_state() -> TransactionEndpointState {
        TransactionEndpointState {
            store: SqliteStore::new(Connection::open_in_memory().unwrap()).unwrap(),
        }
    }

    fn salary_form() -> TransactionForm {
        TransactionForm {
            type_: TransactionType::Income,
            amount: 5200.5,
            date: date!(2024 - 08 - 01),
            category: "Salary".to_owned(),
            description: None,
            account_id: None,
        }
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let state = get_test_state();
        let user_id = UserId::new("alice");
        let transaction = state
            .store
            .create_transaction(
                &user_id,
                Transaction::build(12.3, TransactionType::Expense, date!(2024 - 07 - 01))
                    .category("Food"),
            )
            .unwrap();

        let response = edit_transaction_endpoint(
            State(state.clone()),
            user_id.clone(),
            Path(transaction.id),
            Form(salary_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);
        let parsed = parse_records(state.store.fetch_transactions(&user_id).unwrap());
        assert_eq!(parsed.transactions.len(), 1);
        let updated = &parsed.transactions[0];
        assert_eq!(updated.kind, TransactionType::Income);
        assert_eq!(updated.amount, 5200.5);
        assert_eq!(updated.category, "Salary");
        assert_eq!(updated.date, date!(2024 - 08 - 01));
    }

    #[tokio::test]
    async fn fixes_malformed_record() {
        let state = get_test_state();
        let user_id = UserId::new("alice");
        state
            .store
            .insert_unchecked_transaction("alice", None, Some("income"), Some("someday"));
        let id = state.store.fetch_transactions(&user_id).unwrap()[0].id;

        let response = edit_transaction_endpoint(
            State(state.clone()),
            user_id.clone(),
            Path(id),
            Form(salary_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let parsed = parse_records(state.store.fetch_transactions(&user_id).unwrap());
        assert_eq!(parsed.skipped_count(), 0);
        assert_eq!(parsed.transactions.len(), 1);
    }

    #[tokio::test]
    async fn rejects_invalid_form() {
        let state = get_test_state();
        let user_id = UserId::new("alice");
        let transaction = state
            .store
            .create_transaction(
                &user_id,
                Transaction::build(12.3, TransactionType::Expense, date!(2024 - 07 - 01))
                    .category("Food"),
            )
            .unwrap();
        let mut form = salary_form();
        form.category = String::new();

        let response = edit_transaction_endpoint(
            State(state.clone()),
            user_id.clone(),
            Path(transaction.id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let record = state.store.get_transaction(&user_id, transaction.id).unwrap();
        assert_eq!(record.category.as_deref(), Some("Food"));
    }

    #[tokio::test]
    async fn cannot_update_other_users_transaction() {
        let state = get_test_state();
        let transaction = state
            .store
            .create_transaction(
                &UserId::new("bob"),
                Transaction::build(12.3, TransactionType::Expense, date!(2024 - 07 - 01))
                    .category("Food"),
            )
            .unwrap();

        let response = edit_transaction_endpoint(
            State(state),
            UserId::new("alice"),
            Path(transaction.id),
            Form(salary_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
