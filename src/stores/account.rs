//! Defines the account store trait.

use crate::{
    Error,
    account::{Account, NewAccount},
    auth::UserId,
    database_id::AccountId,
};

/// Handles the creation, retrieval and editing of accounts.
pub trait AccountStore {
    /// Fetch every account owned by `user_id`, newest first.
    fn fetch_accounts(&self, user_id: &UserId) -> Result<Vec<Account>, Error>;

    /// Get a single account owned by `user_id`.
    fn get_account(&self, user_id: &UserId, id: AccountId) -> Result<Account, Error>;

    /// Create a new account for `user_id`.
    fn create_account(&self, user_id: &UserId, account: NewAccount) -> Result<Account, Error>;

    /// Replace the name, type and balance of an account owned by `user_id`.
    fn update_account(
        &self,
        user_id: &UserId,
        id: AccountId,
        account: NewAccount,
    ) -> Result<Account, Error>;

    /// Delete an account owned by `user_id`.
    ///
    /// Transactions that refer to the account are kept and lose the reference.
    fn delete_account(&self, user_id: &UserId, id: AccountId) -> Result<(), Error>;
}
