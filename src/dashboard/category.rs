//! Totals per category.
//!
//! Categories are free text and are compared exactly, so "Food" and "food"
//! are two different categories.

use std::collections::HashMap;

use serde::Serialize;

use crate::transaction::{Transaction, TransactionType};

/// How many expense categories the analytics view shows.
pub const TOP_EXPENSE_CATEGORIES: usize = 7;

/// The total amount for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmount {
    /// The category label.
    pub category: String,
    /// The sum of the amounts in the category.
    pub amount: f64,
}

/// Sum the amounts of transactions of type `kind` per category, largest first.
///
/// Categories with equal totals keep the order they were first seen in.
pub(crate) fn aggregate_categories<'a, I>(
    transactions: I,
    kind: TransactionType,
) -> Vec<CategoryAmount>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: Vec<CategoryAmount> = Vec::new();
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions
        .into_iter()
        .filter(|transaction| transaction.kind == kind)
    {
        match index_by_category.get(transaction.category.as_str()) {
            Some(&index) => totals[index].amount += transaction.amount,
            None => {
                index_by_category.insert(&transaction.category, totals.len());
                totals.push(CategoryAmount {
                    category: transaction.category.clone(),
                    amount: transaction.amount,
                });
            }
        }
    }

    // `sort_by` is stable, so ties stay in first seen order.
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    totals
}

/// The [TOP_EXPENSE_CATEGORIES] largest expense categories.
pub(crate) fn top_expense_categories<'a, I>(transactions: I) -> Vec<CategoryAmount>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut categories = aggregate_categories(transactions, TransactionType::Expense);
    categories.truncate(TOP_EXPENSE_CATEGORIES);
    categories
}

/// The total and number of transactions for a category and transaction type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// The category label.
    pub category: String,
    /// Whether the category holds income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The sum of the amounts.
    pub amount: f64,
    /// The number of transactions.
    pub count: usize,
}

/// Totals and counts per (category, type) pair, in the order each pair is
/// first seen.
pub(crate) fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryBreakdown>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut breakdown: Vec<CategoryBreakdown> = Vec::new();
    let mut index_by_key: HashMap<(&str, TransactionType), usize> = HashMap::new();

    for transaction in transactions {
        let key = (transaction.category.as_str(), transaction.kind);

        match index_by_key.get(&key) {
            Some(&index) => {
                breakdown[index].amount += transaction.amount;
                breakdown[index].count += 1;
            }
            None => {
                index_by_key.insert(key, breakdown.len());
                breakdown.push(CategoryBreakdown {
                    category: transaction.category.clone(),
                    kind: transaction.kind,
                    amount: transaction.amount,
                    count: 1,
                });
            }
        }
    }

    breakdown
}
