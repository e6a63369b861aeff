//! Placeholder budgets derived from spending.
//!
//! There are no user defined budgets yet. Each expense category gets a budget
//! of its actual spending plus [BUDGET_HEADROOM], so every category shows as
//! under budget.

use serde::Serialize;

use crate::dashboard::category::CategoryAmount;

/// The ratio of the synthesized budget to actual spending.
pub const BUDGET_HEADROOM: f64 = 1.1;

/// The budget and actual spending for a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparison {
    /// The category name.
    pub segment: String,
    /// The budget, rounded to a whole currency unit.
    pub budget: f64,
    /// The amount spent.
    pub actual: f64,
}

/// One budget per expense category.
pub(crate) fn synthesize_budget(categories: &[CategoryAmount]) -> Vec<BudgetComparison> {
    categories
        .iter()
        .map(|category| BudgetComparison {
            segment: category.category.clone(),
            budget: budget_for(category.amount),
            actual: category.amount,
        })
        .collect()
}

fn budget_for(actual: f64) -> f64 {
    let budget = (actual * BUDGET_HEADROOM).round();

    // Rounding can drop below tiny amounts, e.g. 0.4 * 1.1 rounds to 0.
    if budget < actual { actual.ceil() } else { budget }
}
