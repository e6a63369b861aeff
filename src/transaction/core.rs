//! Defines the core data models for transactions and the validation step that
//! turns loosely typed store rows into [Transaction]s.

use std::fmt::Display;

use rusqlite::{Connection, Row, types::Value};
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{
    Error,
    auth::UserId,
    database_id::{AccountId, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. a salary.
    Income,
    /// Money spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The name of the type as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Parse a type from text, ignoring case and surrounding whitespace.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        if text.eq_ignore_ascii_case("income") {
            Some(TransactionType::Income)
        } else if text.eq_ignore_ascii_case("expense") {
            Some(TransactionType::Expense)
        } else {
            None
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The amount is always a non-negative magnitude, the direction of the money
/// comes from [Transaction::kind].
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that owns the transaction.
    pub user_id: UserId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// Whether the money was earned or spent.
    pub kind: TransactionType,
    /// A free text label, e.g. "Groceries". Compared exactly, including case.
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// When the transaction happened.
    pub date: Date,
    /// The account the money moved in or out of.
    pub account_id: Option<AccountId>,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, kind: TransactionType, date: Date) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            kind,
            date,
            category: String::new(),
            description: None,
            account_id: None,
        }
    }

    /// The amount with the sign implied by the transaction type, e.g. an
    /// expense of 12.5 is -12.5.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The user supplied fields of a transaction, used for creating and updating
/// transactions.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The magnitude of the transaction.
    pub amount: f64,
    /// Whether the money was earned or spent.
    pub kind: TransactionType,
    /// When the transaction happened.
    pub date: Date,
    /// A free text label, e.g. "Groceries".
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// The account the money moved in or out of.
    pub account_id: Option<AccountId>,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.category);
        self
    }

    /// Set the description for the transaction. Blank descriptions are
    /// stored as no description.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_owned);
        self
    }

    /// Set the account for the transaction.
    pub fn account_id(mut self, account_id: Option<AccountId>) -> Self {
        self.account_id = account_id;
        self
    }

    /// Create the [Transaction] once the store has assigned an ID.
    pub fn finalize(
        self,
        id: TransactionId,
        user_id: UserId,
        created_at: OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id,
            user_id,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            description: self.description,
            date: self.date,
            account_id: self.account_id,
            created_at,
        }
    }

    /// Check the fields a user may get wrong and trim the category.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::InvalidAmount] if the amount is negative or not finite,
    /// - or [Error::EmptyCategory] if the category is blank.
    pub fn validate(mut self) -> Result<Self, Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        let category = self.category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        self.category = category.to_owned();

        Ok(self)
    }
}

/// A transaction row as it comes out of the store.
///
/// The store does not enforce types on `amount`, `type` and `date`, so they
/// are kept as text until [parse_records] checks them.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that owns the transaction.
    pub user_id: UserId,
    /// The amount as text, e.g. "12.50".
    pub amount: Option<String>,
    /// The transaction type as text, e.g. "expense".
    pub kind: Option<String>,
    /// The category label.
    pub category: Option<String>,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// The date as text, e.g. "2024-08-01".
    pub date: Option<String>,
    /// The account the money moved in or out of.
    pub account_id: Option<AccountId>,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

/// Why a [TransactionRecord] could not be turned into a [Transaction].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedReason {
    /// The record has no amount.
    #[error("the amount is missing")]
    MissingAmount,
    /// The amount is not a number.
    #[error("the amount \"{0}\" is not a number")]
    InvalidAmount(String),
    /// The amount is negative, amounts are stored as magnitudes.
    #[error("the amount {0} is negative")]
    NegativeAmount(f64),
    /// The amount is NaN or infinite.
    #[error("the amount is not a finite number")]
    NonFiniteAmount,
    /// The record has no type.
    #[error("the type is missing")]
    MissingType,
    /// The type is neither income nor expense.
    #[error("the type \"{0}\" is not income or expense")]
    UnknownType(String),
    /// The record has no date.
    #[error("the date is missing")]
    MissingDate,
    /// The date is not a calendar date.
    #[error("the date \"{0}\" is not a valid date")]
    InvalidDate(String),
}

/// A record that was left out of the aggregations, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRecord {
    /// The ID of the record.
    pub id: TransactionId,
    /// What is wrong with the record.
    pub reason: MalformedReason,
}

/// The result of validating store records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedTransactions {
    /// The records that passed validation.
    pub transactions: Vec<Transaction>,
    /// The records that were left out.
    pub skipped: Vec<MalformedRecord>,
}

impl ParsedTransactions {
    /// The number of records that were left out.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse the amount text from a record, e.g. " 12.50 ".
pub fn parse_amount(text: &str) -> Result<f64, MalformedReason> {
    let amount: f64 = text
        .trim()
        .parse()
        .map_err(|_| MalformedReason::InvalidAmount(text.to_owned()))?;

    if !amount.is_finite() {
        Err(MalformedReason::NonFiniteAmount)
    } else if amount < 0.0 {
        Err(MalformedReason::NegativeAmount(amount))
    } else {
        Ok(amount)
    }
}

/// Parse the date text from a record.
///
/// Accepts a plain "YYYY-MM-DD" date and timestamps that start with one, e.g.
/// "2024-08-01T00:00:00Z". Only the calendar date is kept.
pub fn parse_date(text: &str) -> Result<Date, MalformedReason> {
    let text = text.trim();
    let date_part = text
        .split(['T', ' '])
        .next()
        .unwrap_or(text);

    Date::parse(date_part, DATE_FORMAT).map_err(|_| MalformedReason::InvalidDate(text.to_owned()))
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = MalformedRecord;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let malformed = |reason| MalformedRecord {
            id: record.id,
            reason,
        };

        let amount = record
            .amount
            .as_deref()
            .ok_or(MalformedReason::MissingAmount)
            .and_then(parse_amount)
            .map_err(malformed)?;

        let kind = match record.kind.as_deref() {
            None => return Err(malformed(MalformedReason::MissingType)),
            Some(text) => TransactionType::parse(text)
                .ok_or_else(|| malformed(MalformedReason::UnknownType(text.to_owned())))?,
        };

        let date = record
            .date
            .as_deref()
            .ok_or(MalformedReason::MissingDate)
            .and_then(parse_date)
            .map_err(malformed)?;

        Ok(Transaction {
            id: record.id,
            user_id: record.user_id,
            amount,
            kind,
            category: record.category.unwrap_or_default(),
            description: record.description,
            date,
            account_id: record.account_id,
            created_at: record.created_at,
        })
    }
}

/// Validate the records from the store.
///
/// Malformed records are left out of the result instead of being coerced to
/// zero, and each one is logged and reported in [ParsedTransactions::skipped].
pub fn parse_records(records: Vec<TransactionRecord>) -> ParsedTransactions {
    let mut parsed = ParsedTransactions {
        transactions: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };

    for record in records {
        match Transaction::try_from(record) {
            Ok(transaction) => parsed.transactions.push(transaction),
            Err(malformed) => {
                tracing::warn!(
                    "skipping malformed transaction {}: {}",
                    malformed.id,
                    malformed.reason
                );
                parsed.skipped.push(malformed);
            }
        }
    }

    parsed
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// `amount`, `type` and `date` are nullable and untyped text/real columns so
/// that rows written by other clients are read back as they are and checked
/// by [parse_records].
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                amount REAL,
                type TEXT,
                category TEXT,
                description TEXT,
                date TEXT,
                account_id INTEGER,
                created_at TEXT NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE SET NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date)",
        (),
    )?;

    Ok(())
}

/// The columns to select for [map_transaction_record_row].
pub const TRANSACTION_RECORD_COLUMNS: &str =
    "id, user_id, amount, type, category, description, date, account_id, created_at";

/// Map a row selected with [TRANSACTION_RECORD_COLUMNS] to a record.
pub fn map_transaction_record_row(row: &Row) -> Result<TransactionRecord, rusqlite::Error> {
    Ok(TransactionRecord {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        amount: value_as_text(row.get(2)?),
        kind: value_as_text(row.get(3)?),
        category: row.get(4)?,
        description: row.get(5)?,
        date: value_as_text(row.get(6)?),
        account_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Blob(_) => None,
        Value::Integer(number) => Some(number.to_string()),
        Value::Real(number) => Some(number.to_string()),
        Value::Text(text) => Some(text),
    }
}
