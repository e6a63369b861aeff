//! Defines the account model and its table.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, auth::UserId, database_id::AccountId};

/// The kind of money container an account is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// An everyday transaction account.
    Checking,
    /// A savings account.
    Savings,
    /// A credit card.
    Credit,
    /// A brokerage or investment account.
    Investment,
}

impl AccountType {
    /// All account types, in the order they are offered to users.
    pub const ALL: [AccountType; 4] = [
        AccountType::Checking,
        AccountType::Savings,
        AccountType::Credit,
        AccountType::Investment,
    ];

    /// The name of the type as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Credit => "credit",
            AccountType::Investment => "investment",
        }
    }

    /// The name of the type for display.
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::Credit => "Credit",
            AccountType::Investment => "Investment",
        }
    }

    /// Parse a type from text, ignoring case and surrounding whitespace.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(text))
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named money container that transactions may refer to.
///
/// The balance is maintained by the user and is never reconciled against
/// transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The user that owns the account.
    pub user_id: UserId,
    /// The name of the account, unique per user.
    pub name: String,
    /// The kind of account.
    pub kind: Option<AccountType>,
    /// The balance as last entered by the user.
    pub balance: Option<f64>,
    /// When the account was created.
    pub created_at: OffsetDateTime,
}

/// The user supplied fields for creating an account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    /// The name of the account.
    pub name: String,
    /// The kind of account.
    pub kind: Option<AccountType>,
    /// The balance of the account.
    pub balance: Option<f64>,
}

impl NewAccount {
    /// Trim the name and check it is not blank.
    ///
    /// # Errors
    /// Returns [Error::EmptyAccountName] if the name is blank.
    pub fn validate(mut self) -> Result<Self, Error> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(Error::EmptyAccountName);
        }

        self.name = name.to_owned();

        Ok(self)
    }
}

/// Create the account table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            type TEXT,
            balance REAL,
            created_at TEXT NOT NULL,
            UNIQUE(user_id, name)
        )",
        (),
    )?;

    Ok(())
}

/// The columns to select for [map_row_to_account].
pub const ACCOUNT_COLUMNS: &str = "id, user_id, name, type, balance, created_at";

/// Map a row selected with [ACCOUNT_COLUMNS] to an account.
pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let kind: Option<String> = row.get(3)?;
    let kind = kind.and_then(|text| {
        let kind = AccountType::parse(&text);

        if kind.is_none() {
            tracing::warn!("ignoring unknown type \"{text}\" for account {id}");
        }

        kind
    });

    Ok(Account {
        id,
        user_id: UserId::new(row.get::<_, String>(1)?),
        name: row.get(2)?,
        kind,
        balance: row.get(4)?,
        created_at: row.get(5)?,
    })
}
