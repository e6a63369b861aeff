//! Contains the traits for fetching and changing a user's transactions and
//! accounts, and their SQLite implementation.
//!
//! Every method takes the [UserId](crate::UserId) of the caller and only sees
//! rows owned by that user.

mod account;
mod transaction;

pub mod sqlite;

pub use account::AccountStore;
pub use transaction::TransactionStore;
