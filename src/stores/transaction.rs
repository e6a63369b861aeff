//! Defines the transaction store trait.

use crate::{
    Error,
    auth::UserId,
    database_id::TransactionId,
    transaction::{Transaction, TransactionBuilder, TransactionRecord},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Fetch every transaction owned by `user_id`, in no particular order.
    ///
    /// Records are returned as stored, see
    /// [parse_records](crate::transaction::parse_records) for validating them.
    fn fetch_transactions(&self, user_id: &UserId) -> Result<Vec<TransactionRecord>, Error>;

    /// Retrieve a single transaction owned by `user_id`.
    fn get_transaction(
        &self,
        user_id: &UserId,
        id: TransactionId,
    ) -> Result<TransactionRecord, Error>;

    /// Create a new transaction for `user_id`.
    fn create_transaction(
        &self,
        user_id: &UserId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error>;

    /// Replace every user supplied field of a transaction owned by `user_id`.
    fn update_transaction(
        &self,
        user_id: &UserId,
        id: TransactionId,
        builder: TransactionBuilder,
    ) -> Result<Transaction, Error>;

    /// Delete a transaction owned by `user_id`.
    fn delete_transaction(&self, user_id: &UserId, id: TransactionId) -> Result<(), Error>;
}
