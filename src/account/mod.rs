//! Accounts: named money containers that transactions may refer to.

mod accounts_page;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;

pub use accounts_page::get_accounts_page;
pub use core::{
    ACCOUNT_COLUMNS, Account, AccountType, NewAccount, create_account_table, map_row_to_account,
};
pub use create_endpoint::create_account_endpoint;
pub use delete_endpoint::delete_account_endpoint;
pub use edit_endpoint::edit_account_endpoint;
pub use edit_page::get_edit_account_page;
