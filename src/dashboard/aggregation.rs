//! Combines the period, trend, category, budget, payment method and KPI
//! calculations into the figures shown on the dashboard and analytics pages.
//!
//! Everything here is a pure function of the transactions passed in. Results
//! are recomputed for every request.

use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    dashboard::{
        budget::{BudgetComparison, synthesize_budget},
        category::{CategoryAmount, top_expense_categories},
        kpi::{Kpis, all_time_kpis, windowed_kpis},
        payment_method::{PaymentMethodShare, estimate_payment_methods},
        period::{bucket_by_month, partition_by_period},
        trend::{MonthlyTrend, monthly_trends, sum_by_type},
    },
    transaction::Transaction,
};

/// Headline figures for the dashboard.
///
/// `total_income`, `total_expenses` and `net_worth` cover every transaction.
/// The monthly figures, the savings rate and the growth figures only cover
/// the calendar month containing the reference date and the month before it.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of all expenses.
    pub total_expenses: f64,
    /// All income minus all expenses.
    pub net_worth: f64,
    /// The share of this month's income that was not spent, as a percentage.
    pub savings_rate: f64,
    /// Income in the current calendar month.
    pub monthly_income: f64,
    /// Expenses in the current calendar month.
    pub monthly_expenses: f64,
    /// The change in net worth against last month's net income, as a percentage.
    pub net_worth_growth: f64,
    /// The change in monthly income from last month, as a percentage.
    pub income_growth: f64,
    /// The change in monthly expenses from last month, as a percentage.
    pub expense_growth: f64,
    /// The change in savings rate from last month, as a percentage.
    pub savings_growth: f64,
}

/// The charts and all-time figures for the analytics page.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    /// Income and expenses for the most recent months with activity, oldest first.
    pub monthly_data: Vec<MonthlyTrend>,
    /// The largest expense categories, largest first.
    pub category_data: Vec<CategoryAmount>,
    /// A budget for each category in `category_data`.
    pub budget_data: Vec<BudgetComparison>,
    /// The estimated split of transactions by payment method.
    pub payment_method_data: Vec<PaymentMethodShare>,
    /// Totals over every transaction.
    pub kpis: Kpis,
}

/// Order transactions by date, then by ID for transactions on the same day.
pub(crate) fn sort_chronologically(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|transaction| (transaction.date, transaction.id));
    sorted
}

/// Income and expenses for the most recent months with activity, oldest first.
pub(crate) fn compute_monthly_trends(transactions: &[Transaction]) -> Vec<MonthlyTrend> {
    monthly_trends(&bucket_by_month(sort_chronologically(transactions)))
}

/// The `count` most recent transactions, newest first.
pub(crate) fn most_recent(transactions: &[Transaction], count: usize) -> Vec<&Transaction> {
    let mut recent = sort_chronologically(transactions);
    recent.reverse();
    recent.truncate(count);
    recent
}

/// Calculate the dashboard figures.
///
/// The current month is the calendar month of `reference_instant`'s date, so
/// `reference_instant` should already be in the user's local offset.
pub fn compute_dashboard_stats(
    transactions: &[Transaction],
    reference_instant: OffsetDateTime,
) -> DashboardStats {
    let partition = partition_by_period(transactions, reference_instant.date());
    let (total_income, total_expenses) = sum_by_type(transactions);
    let net_worth = total_income - total_expenses;
    let windowed = windowed_kpis(
        &partition.current_month,
        &partition.previous_month,
        net_worth,
    );

    DashboardStats {
        total_income,
        total_expenses,
        net_worth,
        savings_rate: windowed.savings_rate,
        monthly_income: windowed.monthly_income,
        monthly_expenses: windowed.monthly_expenses,
        net_worth_growth: windowed.net_worth_growth,
        income_growth: windowed.income_growth,
        expense_growth: windowed.expense_growth,
        savings_growth: windowed.savings_growth,
    }
}

/// Calculate the analytics page figures over the whole transaction history.
pub fn compute_analytics_data(transactions: &[Transaction]) -> AnalyticsData {
    let chronological = sort_chronologically(transactions);

    let monthly_data = compute_monthly_trends(transactions);
    let category_data = top_expense_categories(chronological.iter().copied());
    let budget_data = synthesize_budget(&category_data);

    AnalyticsData {
        monthly_data,
        category_data,
        budget_data,
        payment_method_data: estimate_payment_methods(transactions.len()),
        kpis: all_time_kpis(chronological.iter().copied()),
    }
}
