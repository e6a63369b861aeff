//! Headline figures: totals, savings rate and month on month growth.

use serde::Serialize;

use crate::{dashboard::trend::sum_by_type, transaction::Transaction};

/// Totals over a user's entire transaction history.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of all expenses.
    pub total_expenses: f64,
    /// Income minus expenses.
    pub net_savings: f64,
    /// Net savings as a percentage of income, or zero if there is no income.
    pub savings_rate: f64,
}

/// The percentage of `income` left after `expenses`, or zero when there is
/// no income.
pub(crate) fn savings_rate(income: f64, expenses: f64) -> f64 {
    if income > 0.0 {
        (income - expenses) / income * 100.0
    } else {
        0.0
    }
}

/// The percentage change from `previous` to `current`.
///
/// Zero whenever `previous` is zero, however large `current` is.
pub(crate) fn growth(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous.abs() * 100.0
    }
}

/// Totals over every transaction, not just a single month.
pub(crate) fn all_time_kpis<'a, I>(transactions: I) -> Kpis
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (total_income, total_expenses) = sum_by_type(transactions);

    Kpis {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
        savings_rate: savings_rate(total_income, total_expenses),
    }
}

/// Figures for the current calendar month and their change from the month before.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct WindowedKpis {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings_rate: f64,
    pub net_worth_growth: f64,
    pub income_growth: f64,
    pub expense_growth: f64,
    pub savings_growth: f64,
}

/// Compare the current month against the previous month.
///
/// `net_worth` is the all-time figure. Its growth is measured against the
/// previous month's net income, so the result mixes two time horizons.
pub(crate) fn windowed_kpis(
    current_month: &[&Transaction],
    previous_month: &[&Transaction],
    net_worth: f64,
) -> WindowedKpis {
    let (monthly_income, monthly_expenses) = sum_by_type(current_month.iter().copied());
    let (previous_income, previous_expenses) = sum_by_type(previous_month.iter().copied());

    let current_savings_rate = savings_rate(monthly_income, monthly_expenses);
    let previous_savings_rate = savings_rate(previous_income, previous_expenses);
    let previous_net_worth = previous_income - previous_expenses;

    WindowedKpis {
        monthly_income,
        monthly_expenses,
        savings_rate: current_savings_rate,
        net_worth_growth: growth(net_worth, previous_net_worth),
        income_growth: growth(monthly_income, previous_income),
        expense_growth: growth(monthly_expenses, previous_expenses),
        savings_growth: growth(current_savings_rate, previous_savings_rate),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        dashboard::test_utils::{expense, income},
        transaction::Transaction,
    };

    use super::{Kpis, all_time_kpis, growth, savings_rate, windowed_kpis};

    #[test]
    fn savings_rate_is_zero_without_income() {
        assert_eq!(savings_rate(0.0, 0.0), 0.0);
        assert_eq!(savings_rate(0.0, 500.0), 0.0);
    }

    #[test]
    fn savings_rate_can_be_negative() {
        assert_eq!(savings_rate(100.0, 150.0), -50.0);
    }

    #[test]
    fn growth_is_zero_when_previous_is_zero() {
        assert_eq!(growth(5000.0, 0.0), 0.0);
        assert_eq!(growth(0.0, 0.0), 0.0);
    }

    #[test]
    fn growth_uses_magnitude_of_previous() {
        assert_eq!(growth(150.0, 100.0), 50.0);
        assert_eq!(growth(50.0, 100.0), -50.0);
        assert_eq!(growth(-50.0, -100.0), 50.0);
    }

    #[test]
    fn all_time_kpis_cover_every_transaction() {
        let transactions = vec![
            income(5200.0, date!(2024 - 08 - 01)),
            expense(1800.0, "Housing", date!(2023 - 01 - 01)),
            income(800.0, date!(2022 - 05 - 05)),
            expense(200.0, "Food", date!(2024 - 08 - 02)),
        ];

        let kpis = all_time_kpis(&transactions);

        assert_eq!(kpis.total_income, 6000.0);
        assert_eq!(kpis.total_expenses, 2000.0);
        assert_eq!(kpis.net_savings, 4000.0);
        assert_eq!(kpis.net_savings, kpis.total_income - kpis.total_expenses);
        assert!((kpis.savings_rate - 66.666).abs() < 0.01);
    }

    #[test]
    fn all_time_kpis_of_nothing_are_zero() {
        let transactions: Vec<Transaction> = Vec::new();

        let kpis = all_time_kpis(&transactions);

        assert_eq!(kpis, Kpis::default());
    }

    #[test]
    fn windowed_kpis_compare_with_previous_month() {
        let current = [
            income(5000.0, date!(2024 - 08 - 01)),
            expense(1000.0, "Housing", date!(2024 - 08 - 01)),
        ];
        let previous = [
            income(4000.0, date!(2024 - 07 - 01)),
            expense(2000.0, "Housing", date!(2024 - 07 - 01)),
        ];
        let current: Vec<_> = current.iter().collect();
        let previous: Vec<_> = previous.iter().collect();

        let kpis = windowed_kpis(&current, &previous, 10_000.0);

        assert_eq!(kpis.monthly_income, 5000.0);
        assert_eq!(kpis.monthly_expenses, 1000.0);
        assert_eq!(kpis.savings_rate, 80.0);
        assert_eq!(kpis.income_growth, 25.0);
        assert_eq!(kpis.expense_growth, -50.0);
        // Previous savings rate is 50%.
        assert_eq!(kpis.savings_growth, 60.0);
        // Previous net is 2000.
        assert_eq!(kpis.net_worth_growth, 400.0);
    }

    #[test]
    fn windowed_growth_is_zero_after_an_empty_month() {
        let current = [income(5000.0, date!(2024 - 08 - 01))];
        let current: Vec<_> = current.iter().collect();

        let kpis = windowed_kpis(&current, &[], 5000.0);

        assert_eq!(kpis.monthly_income, 5000.0);
        assert_eq!(kpis.income_growth, 0.0);
        assert_eq!(kpis.expense_growth, 0.0);
        assert_eq!(kpis.savings_growth, 0.0);
        assert_eq!(kpis.net_worth_growth, 0.0);
    }
}
