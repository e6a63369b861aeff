//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, database_id::AccountId, html::error_view,
    internal_server_error::InternalServerError, not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not carry the identity of an authenticated user.
    ///
    /// Authentication is delegated to the hosted auth provider in front of
    /// the server, so this usually means the request bypassed it.
    #[error("the request is not authenticated")]
    Unauthenticated,

    /// The configured identity header name is not a valid HTTP header name.
    #[error("invalid identity header name \"{0}\"")]
    InvalidIdentityHeader(String),

    /// A transaction amount was negative or not a finite number.
    ///
    /// Amounts are stored as magnitudes, the direction of the money comes
    /// from the transaction type.
    #[error("{0} is not a valid transaction amount")]
    InvalidAmount(f64),

    /// A transaction was submitted without a category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// An account was submitted without a name.
    #[error("account name cannot be empty")]
    EmptyAccountName,

    /// The account ID used for a transaction does not refer to one of the
    /// user's accounts.
    #[error("the account ID does not refer to a valid account")]
    InvalidAccount(Option<AccountId>),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The specified account name already exists for the user.
    #[error("the account \"{0}\" already exists")]
    DuplicateAccountName(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete an account that does not exist
    #[error("tried to delete an account that is not in the database")]
    DeleteMissingAccount,

    /// Tried to update an account that does not exist
    #[error("tried to update an account that is not in the database")]
    UpdateMissingAccount,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                error_view(
                    "Unauthorized",
                    "401",
                    "You are not signed in.",
                    "Sign in through your account provider and try again.",
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Alert::Error {
                    message: "Not signed in".to_owned(),
                    details: "Sign in through your account provider and try again.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!(
                        "{amount} is not a valid amount. Enter a positive number and \
                        choose whether it is income or an expense."
                    ),
                },
            ),
            Error::EmptyCategory => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Category cannot be empty".to_owned(),
                },
            ),
            Error::EmptyAccountName => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Account name cannot be empty".to_owned(),
                },
            ),
            Error::InvalidAccount(account_id) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid account".to_owned(),
                    details: match account_id {
                        Some(id) => format!("Could not find an account with the ID {id}"),
                        None => "Could not find the selected account".to_owned(),
                    },
                },
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update transaction".to_owned(),
                    details: "The transaction could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            ),
            Error::DeleteMissingAccount => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete account".to_owned(),
                    details: "The account could not be found. \
                    Try refreshing the page to see if the account has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingAccount => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update account".to_owned(),
                    details: "The account could not be found.".to_owned(),
                },
            ),
            Error::DuplicateAccountName(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate Account Name".to_owned(),
                    details: format!(
                        "The account {name} already exists. \
                        Choose a different account name, or delete the existing account.",
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
