//! Transaction management.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, the raw `TransactionRecord` it is read from and
//!   the validation between the two
//! - The form shared by the create and edit pages
//! - View handlers for the transaction pages and endpoints

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod transactions_page;

pub use core::{
    MalformedReason, MalformedRecord, ParsedTransactions, TRANSACTION_RECORD_COLUMNS,
    Transaction, TransactionBuilder, TransactionRecord, TransactionType,
    create_transaction_table, map_transaction_record_row, parse_records,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use transactions_page::get_transactions_page;
