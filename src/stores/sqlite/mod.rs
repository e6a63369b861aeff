//! Implements the stores with a SQLite database.

mod account;
mod transaction;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// Stores transactions and accounts in a SQLite database.
///
/// Row level security is done by scoping every query to the caller's user ID.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

#[cfg(test)]
impl SqliteStore {
    /// Insert a transaction row without any checks, the way another client
    /// writing to the same database might.
    pub(crate) fn insert_unchecked_transaction(
        &self,
        user_id: &str,
        amount: Option<&str>,
        kind: Option<&str>,
        date: Option<&str>,
    ) {
        self.lock()
            .unwrap()
            .execute(
                "INSERT INTO \"transaction\" (user_id, amount, type, category, date, created_at)
                 VALUES (?1, ?2, ?3, 'Imported', ?4, ?5)",
                (user_id, amount, kind, date, time::OffsetDateTime::now_utc()),
            )
            .unwrap();
    }
}
