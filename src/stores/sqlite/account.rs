//! Implements the account store for [SqliteStore].

use time::OffsetDateTime;

use crate::{
    Error,
    account::{ACCOUNT_COLUMNS, Account, NewAccount, map_row_to_account},
    auth::UserId,
    database_id::AccountId,
    stores::AccountStore,
};

use super::SqliteStore;

impl AccountStore for SqliteStore {
    /// Fetch the user's accounts, most recently created first.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn fetch_accounts(&self, user_id: &UserId) -> Result<Vec<Account>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {ACCOUNT_COLUMNS} FROM account WHERE user_id = :user_id \
                ORDER BY created_at DESC, id DESC"
            ))?
            .query_map(&[(":user_id", user_id.as_str())], map_row_to_account)?
            .map(|account_result| account_result.map_err(Error::from))
            .collect()
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to an account owned by `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get_account(&self, user_id: &UserId, id: AccountId) -> Result<Account, Error> {
        let connection = self.lock()?;

        let account = connection
            .prepare(&format!(
                "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row((id, user_id.as_str()), map_row_to_account)?;

        Ok(account)
    }

    /// Create a new account.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateAccountName] if the user already has an account with the same name,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create_account(&self, user_id: &UserId, account: NewAccount) -> Result<Account, Error> {
        let connection = self.lock()?;

        let created_at = OffsetDateTime::now_utc();
        let id = connection
            .prepare(
                "INSERT INTO account (user_id, name, type, balance, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id",
            )?
            .query_row(
                (
                    user_id.as_str(),
                    &account.name,
                    account.kind.map(|kind| kind.as_str()),
                    account.balance,
                    created_at,
                ),
                |row| row.get(0),
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error {
                        code: _,
                        extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                    },
                    _,
                ) => Error::DuplicateAccountName(account.name.clone()),
                error => error.into(),
            })?;

        Ok(Account {
            id,
            user_id: user_id.clone(),
            name: account.name,
            kind: account.kind,
            balance: account.balance,
            created_at,
        })
    }

    /// Update an account in place, keeping its creation time.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingAccount] if `id` does not refer to an account owned by `user_id`,
    /// - [Error::DuplicateAccountName] if the user has another account with the new name,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update_account(
        &self,
        user_id: &UserId,
        id: AccountId,
        account: NewAccount,
    ) -> Result<Account, Error> {
        let connection = self.lock()?;

        let created_at = connection
            .prepare(
                "UPDATE account SET name = ?1, type = ?2, balance = ?3
                 WHERE id = ?4 AND user_id = ?5
                 RETURNING created_at",
            )?
            .query_row(
                (
                    &account.name,
                    account.kind.map(|kind| kind.as_str()),
                    account.balance,
                    id,
                    user_id.as_str(),
                ),
                |row| row.get(0),
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingAccount,
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error {
                        code: _,
                        extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                    },
                    _,
                ) => Error::DuplicateAccountName(account.name.clone()),
                error => error.into(),
            })?;

        Ok(Account {
            id,
            user_id: user_id.clone(),
            name: account.name,
            kind: account.kind,
            balance: account.balance,
            created_at,
        })
    }

    /// Delete an account.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingAccount] if `id` does not refer to an account owned by `user_id`,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete_account(&self, user_id: &UserId, id: AccountId) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "DELETE FROM account WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_str()),
        )?;

        if rows_affected == 0 {
            Err(Error::DeleteMissingAccount)
        } else {
            Ok(())
        }
    }
}
