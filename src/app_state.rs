//! Implements a struct that holds the state of the REST server.

use axum::http::HeaderName;
use rusqlite::Connection;

use crate::{Error, stores::sqlite::SqliteStore, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The request header carrying the ID of the authenticated user.
    pub identity_header: HeaderName,

    /// The store for transactions and accounts.
    pub store: SqliteStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or if
    /// `local_timezone` is not a known timezone.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        identity_header: HeaderName,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            tracing::error!("Invalid timezone {local_timezone}");
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            identity_header,
            store: SqliteStore::new(db_connection)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderName;
    use rusqlite::Connection;

    use crate::Error;

    use super::AppState;

    #[test]
    fn rejects_unknown_timezone() {
        let connection = Connection::open_in_memory().unwrap();

        let result = AppState::new(
            connection,
            "Not/A_Timezone",
            HeaderName::from_static("x-forwarded-user"),
        );

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Not/A_Timezone".to_owned()))
        );
    }

    #[test]
    fn creates_state_with_valid_settings() {
        let connection = Connection::open_in_memory().unwrap();

        let state = AppState::new(
            connection,
            "Pacific/Auckland",
            HeaderName::from_static("x-forwarded-user"),
        )
        .unwrap();

        assert_eq!(state.local_timezone, "Pacific/Auckland");
        assert_eq!(state.identity_header, "x-forwarded-user");
    }
}
