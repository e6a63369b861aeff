//! Implements the transaction store for [SqliteStore].

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    auth::UserId,
    database_id::{AccountId, TransactionId},
    stores::TransactionStore,
    transaction::{
        TRANSACTION_RECORD_COLUMNS, Transaction, TransactionBuilder, TransactionRecord,
        map_transaction_record_row,
    },
};

use super::SqliteStore;

/// Check that `account_id`, if set, refers to one of the user's accounts.
fn check_account_owner(
    account_id: Option<AccountId>,
    user_id: &UserId,
    connection: &Connection,
) -> Result<(), Error> {
    let Some(account_id) = account_id else {
        return Ok(());
    };

    let is_owner: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM account WHERE id = ?1 AND user_id = ?2)",
        (account_id, user_id.as_str()),
        |row| row.get(0),
    )?;

    if is_owner {
        Ok(())
    } else {
        tracing::warn!("user {user_id} tried to use account {account_id} which they do not own");
        Err(Error::InvalidAccount(Some(account_id)))
    }
}

fn map_foreign_key_error(error: rusqlite::Error, account_id: Option<AccountId>) -> Error {
    match error {
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        ) => Error::InvalidAccount(account_id),
        error => error.into(),
    }
}

impl TransactionStore for SqliteStore {
    /// Fetch every transaction owned by `user_id`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn fetch_transactions(&self, user_id: &UserId) -> Result<Vec<TransactionRecord>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {TRANSACTION_RECORD_COLUMNS} FROM \"transaction\" WHERE user_id = :user_id"
            ))?
            .query_map(&[(":user_id", user_id.as_str())], map_transaction_record_row)?
            .map(|maybe_record| maybe_record.map_err(Error::from))
            .collect()
    }

    /// Retrieve a transaction by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction owned by `user_id`,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get_transaction(
        &self,
        user_id: &UserId,
        id: TransactionId,
    ) -> Result<TransactionRecord, Error> {
        let connection = self.lock()?;

        let record = connection
            .prepare(&format!(
                "SELECT {TRANSACTION_RECORD_COLUMNS} FROM \"transaction\" \
                WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row((id, user_id.as_str()), map_transaction_record_row)?;

        Ok(record)
    }

    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAccount] if the account ID does not refer to one of the user's accounts,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create_transaction(
        &self,
        user_id: &UserId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        check_account_owner(builder.account_id, user_id, &connection)?;

        let created_at = OffsetDateTime::now_utc();
        let id = connection
            .prepare(
                "INSERT INTO \"transaction\"
                    (user_id, amount, type, category, description, date, account_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 RETURNING id",
            )?
            .query_row(
                (
                    user_id.as_str(),
                    builder.amount,
                    builder.kind.as_str(),
                    &builder.category,
                    &builder.description,
                    builder.date,
                    builder.account_id,
                    created_at,
                ),
                |row| row.get(0),
            )
            .map_err(|error| map_foreign_key_error(error, builder.account_id))?;

        Ok(builder.finalize(id, user_id.clone(), created_at))
    }

    /// Replace the user supplied fields of a transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a transaction owned by `user_id`,
    /// - [Error::InvalidAccount] if the account ID does not refer to one of the user's accounts,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update_transaction(
        &self,
        user_id: &UserId,
        id: TransactionId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        check_account_owner(builder.account_id, user_id, &connection)?;

        let created_at = connection
            .prepare(
                "UPDATE \"transaction\"
                 SET amount = ?1, type = ?2, category = ?3, description = ?4, date = ?5, account_id = ?6
                 WHERE id = ?7 AND user_id = ?8
                 RETURNING created_at",
            )?
            .query_row(
                (
                    builder.amount,
                    builder.kind.as_str(),
                    &builder.category,
                    &builder.description,
                    builder.date,
                    builder.account_id,
                    id,
                    user_id.as_str(),
                ),
                |row| row.get(0),
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
                error => map_foreign_key_error(error, builder.account_id),
            })?;

        Ok(builder.finalize(id, user_id.clone(), created_at))
    }

    /// Delete a transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a transaction owned by `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete_transaction(&self, user_id: &UserId, id: TransactionId) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_str()),
        )?;

        if rows_affected == 0 {
            Err(Error::DeleteMissingTransaction)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{OffsetDateTime, macros::date};

    use crate::{
        Error,
        account::NewAccount,
        auth::UserId,
        stores::{AccountStore, TransactionStore, sqlite::SqliteStore},
        transaction::{
            MalformedReason, Transaction, TransactionBuilder, TransactionType, parse_records,
        },
    };

    fn get_test_store() -> SqliteStore {
        SqliteStore::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    fn groceries() -> TransactionBuilder {
        Transaction::build(45.5, TransactionType::Expense, date!(2024 - 08 - 02))
            .category("Groceries")
            .description(Some("Weekly shop"))
    }

    #[test]
    fn create_then_fetch() {
        let store = get_test_store();
        let user = UserId::new("alice");

        let created = store.create_transaction(&user, groceries()).unwrap();
        let records = store.fetch_transactions(&user).unwrap();

        let parsed = parse_records(records);
        assert_eq!(parsed.skipped, vec![]);
        assert_eq!(parsed.transactions.len(), 1);
        let fetched = &parsed.transactions[0];
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.amount, 45.5);
        assert_eq!(fetched.kind, TransactionType::Expense);
        assert_eq!(fetched.category, "Groceries");
        assert_eq!(fetched.description.as_deref(), Some("Weekly shop"));
        assert_eq!(fetched.date, date!(2024 - 08 - 02));
    }

    #[test]
    fn fetch_only_returns_own_transactions() {
        let store = get_test_store();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        store.create_transaction(&alice, groceries()).unwrap();

        assert_eq!(store.fetch_transactions(&bob), Ok(vec![]));
    }

    #[test]
    fn other_users_transactions_are_not_found() {
        let store = get_test_store();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        let transaction = store.create_transaction(&alice, groceries()).unwrap();

        assert_eq!(
            store.get_transaction(&bob, transaction.id),
            Err(Error::NotFound)
        );
        assert_eq!(
            store.update_transaction(&bob, transaction.id, groceries()),
            Err(Error::UpdateMissingTransaction)
        );
        assert_eq!(
            store.delete_transaction(&bob, transaction.id),
            Err(Error::DeleteMissingTransaction)
        );
        assert!(store.get_transaction(&alice, transaction.id).is_ok());
    }

    #[test]
    fn update_replaces_fields() {
        let store = get_test_store();
        let user = UserId::new("alice");
        let transaction = store.create_transaction(&user, groceries()).unwrap();

        let updated = store
            .update_transaction(
                &user,
                transaction.id,
                Transaction::build(5200.0, TransactionType::Income, date!(2024 - 08 - 01))
                    .category("Salary"),
            )
            .unwrap();

        assert_eq!(updated.id, transaction.id);
        let record = store.get_transaction(&user, transaction.id).unwrap();
        let fetched = Transaction::try_from(record).unwrap();
        assert_eq!(fetched.amount, 5200.0);
        assert_eq!(fetched.kind, TransactionType::Income);
        assert_eq!(fetched.category, "Salary");
        assert_eq!(fetched.description, None);
    }

    #[test]
    fn delete_removes_transaction() {
        let store = get_test_store();
        let user = UserId::new("alice");
        let transaction = store.create_transaction(&user, groceries()).unwrap();

        assert_eq!(store.delete_transaction(&user, transaction.id), Ok(()));
        assert_eq!(
            store.get_transaction(&user, transaction.id),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn rejects_accounts_of_other_users() {
        let store = get_test_store();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        let account = store
            .create_account(
                &bob,
                NewAccount {
                    name: "Everyday".to_owned(),
                    kind: None,
                    balance: None,
                },
            )
            .unwrap();

        let result = store.create_transaction(&alice, groceries().account_id(Some(account.id)));

        assert_eq!(result, Err(Error::InvalidAccount(Some(account.id))));
    }

    #[test]
    fn rejects_missing_account() {
        let store = get_test_store();
        let user = UserId::new("alice");

        let result = store.create_transaction(&user, groceries().account_id(Some(999)));

        assert_eq!(result, Err(Error::InvalidAccount(Some(999))));
    }

    #[test]
    fn deleting_account_keeps_transactions() {
        let store = get_test_store();
        let user = UserId::new("alice");
        let account = store
            .create_account(
                &user,
                NewAccount {
                    name: "Everyday".to_owned(),
                    kind: None,
                    balance: None,
                },
            )
            .unwrap();
        let transaction = store
            .create_transaction(&user, groceries().account_id(Some(account.id)))
            .unwrap();

        store.delete_account(&user, account.id).unwrap();

        let record = store.get_transaction(&user, transaction.id).unwrap();
        assert_eq!(record.account_id, None);
    }

    #[test]
    fn malformed_rows_are_returned_as_records() {
        let store = get_test_store();
        let user = UserId::new("alice");
        store.create_transaction(&user, groceries()).unwrap();
        store
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO \"transaction\" (user_id, amount, type, date, created_at)
                 VALUES ('alice', 'lots', 'expense', '2024-08-03', ?1)",
                (OffsetDateTime::now_utc(),),
            )
            .unwrap();

        let parsed = parse_records(store.fetch_transactions(&user).unwrap());

        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(
            parsed.skipped[0].reason,
            MalformedReason::InvalidAmount("lots".to_owned())
        );
    }
}
