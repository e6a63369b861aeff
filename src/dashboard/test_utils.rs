use std::sync::atomic::{AtomicI64, Ordering};

use time::{Date, OffsetDateTime};

use crate::{
    auth::UserId,
    transaction::{Transaction, TransactionType},
};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

pub fn transaction(amount: f64, kind: TransactionType, category: &str, date: Date) -> Transaction {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);

    Transaction::build(amount, kind, date)
        .category(category)
        .finalize(id, UserId::new("test"), OffsetDateTime::UNIX_EPOCH)
}

pub fn income(amount: f64, date: Date) -> Transaction {
    transaction(amount, TransactionType::Income, "Salary", date)
}

pub fn expense(amount: f64, category: &str, date: Date) -> Transaction {
    transaction(amount, TransactionType::Expense, category, date)
}
