//! Monthly and daily income/expense series.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::{
    dashboard::period::{MonthBuckets, MonthKey},
    transaction::{Transaction, TransactionType},
};

/// The number of months shown in the monthly trend.
pub const TREND_MONTHS: usize = 6;

/// Income and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// The month, serialized as "YYYY-MM".
    pub period: MonthKey,
    /// The total income for the month.
    pub income: f64,
    /// The total expenses for the month, as a positive number.
    pub expenses: f64,
}

impl MonthlyTrend {
    /// Income minus expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Sum income and expenses separately.
pub(crate) fn sum_by_type<'a, I>(transactions: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold((0.0, 0.0), |(income, expenses), transaction| {
            match transaction.kind {
                TransactionType::Income => (income + transaction.amount, expenses),
                TransactionType::Expense => (income, expenses + transaction.amount),
            }
        })
}

/// Totals for the most recent months that have transactions, oldest first.
///
/// Months without any transactions are skipped rather than filled with zeros,
/// so fewer than [TREND_MONTHS] entries are returned for short histories.
pub(crate) fn monthly_trends(by_month: &MonthBuckets<'_>) -> Vec<MonthlyTrend> {
    let skip = by_month.len().saturating_sub(TREND_MONTHS);

    by_month
        .iter()
        .skip(skip)
        .map(|(&period, transactions)| {
            let (income, expenses) = sum_by_type(transactions.iter().copied());

            MonthlyTrend {
                period,
                income,
                expenses,
            }
        })
        .collect()
}

/// The running total of net savings at the end of each month in `trends`.
pub(crate) fn cumulative_net_savings(trends: &[MonthlyTrend]) -> Vec<f64> {
    trends
        .iter()
        .scan(0.0, |total, trend| {
            *total += trend.net();
            Some(*total)
        })
        .collect()
}

/// How many days of cash flow to show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DailyWindow {
    /// The last 7 days.
    #[serde(rename = "7d")]
    Week,
    /// The last 30 days.
    #[serde(rename = "30d")]
    Month,
    /// The last 90 days.
    #[default]
    #[serde(rename = "90d")]
    Quarter,
}

impl DailyWindow {
    /// All windows, shortest first.
    pub const ALL: [DailyWindow; 3] = [
        DailyWindow::Week,
        DailyWindow::Month,
        DailyWindow::Quarter,
    ];

    /// The number of days before the end date that the window starts.
    pub fn days(&self) -> i64 {
        match self {
            DailyWindow::Week => 7,
            DailyWindow::Month => 30,
            DailyWindow::Quarter => 90,
        }
    }

    /// The value used in query strings.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            DailyWindow::Week => "7d",
            DailyWindow::Month => "30d",
            DailyWindow::Quarter => "90d",
        }
    }

    /// A label for buttons.
    pub fn label(&self) -> &'static str {
        match self {
            DailyWindow::Week => "7 days",
            DailyWindow::Month => "30 days",
            DailyWindow::Quarter => "90 days",
        }
    }
}

/// The money in and out on a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCashFlow {
    /// The day.
    pub date: Date,
    /// Income on the day.
    pub income: f64,
    /// Expenses on the day, as a positive number.
    pub expenses: f64,
    /// Income minus expenses from the start of the window up to and including this day.
    pub balance: f64,
}

/// One entry per day from `end_date - days` to `end_date` inclusive.
///
/// Days without transactions have zero income and expenses and carry the
/// previous balance forward.
pub(crate) fn daily_series(
    transactions: &[Transaction],
    end_date: Date,
    days: i64,
) -> Vec<DailyCashFlow> {
    let start_date = end_date - Duration::days(days);
    let mut totals: HashMap<Date, (f64, f64)> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| (start_date..=end_date).contains(&transaction.date))
    {
        let (income, expenses) = totals.entry(transaction.date).or_insert((0.0, 0.0));

        match transaction.kind {
            TransactionType::Income => *income += transaction.amount,
            TransactionType::Expense => *expenses += transaction.amount,
        }
    }

    let mut series = Vec::with_capacity(days.max(0) as usize + 1);
    let mut balance = 0.0;
    let mut date = start_date;

    while date <= end_date {
        let (income, expenses) = totals.get(&date).copied().unwrap_or((0.0, 0.0));
        balance += income - expenses;

        series.push(DailyCashFlow {
            date,
            income,
            expenses,
            balance,
        });

        match date.next_day() {
            Some(next_day) => date = next_day,
            None => break,
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::dashboard::{
        period::bucket_by_month,
        test_utils::{expense, income},
    };

    use super::{DailyWindow, MonthlyTrend, cumulative_net_savings, daily_series, monthly_trends};

    #[test]
    fn monthly_trends_sum_each_type() {
        let transactions = vec![
            income(5200.0, date!(2024 - 08 - 01)),
            expense(1800.0, "Housing", date!(2024 - 08 - 01)),
            expense(450.0, "Food", date!(2024 - 08 - 02)),
            expense(60.0, "Food", date!(2024 - 07 - 12)),
        ];

        let trends = monthly_trends(&bucket_by_month(&transactions));

        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].period.to_string(), "2024-07");
        assert_eq!(trends[0].income, 0.0);
        assert_eq!(trends[0].expenses, 60.0);
        assert_eq!(trends[1].period.to_string(), "2024-08");
        assert_eq!(trends[1].income, 5200.0);
        assert_eq!(trends[1].expenses, 2250.0);
        assert_eq!(trends[1].net(), 2950.0);
    }

    #[test]
    fn monthly_trends_keep_last_six_months_ascending() {
        let transactions: Vec<_> = (1..=9u8)
            .rev()
            .map(|month| {
                let date = time::Date::from_calendar_date(
                    2024,
                    time::Month::try_from(month).unwrap(),
                    10,
                )
                .unwrap();
                income(month as f64, date)
            })
            .collect();

        let trends = monthly_trends(&bucket_by_month(&transactions));

        let periods: Vec<_> = trends.iter().map(|t| t.period.to_string()).collect();
        assert_eq!(
            periods,
            vec!["2024-04", "2024-05", "2024-06", "2024-07", "2024-08", "2024-09"]
        );
    }

    #[test]
    fn monthly_trends_do_not_pad_gaps() {
        let transactions = vec![
            income(1.0, date!(2024 - 01 - 10)),
            income(1.0, date!(2024 - 06 - 10)),
        ];

        let trends = monthly_trends(&bucket_by_month(&transactions));

        assert_eq!(trends.len(), 2);
    }

    #[test]
    fn cumulative_savings_is_running_net() {
        let trends = vec![
            MonthlyTrend {
                period: crate::dashboard::MonthKey::of(date!(2024 - 01 - 01)),
                income: 100.0,
                expenses: 40.0,
            },
            MonthlyTrend {
                period: crate::dashboard::MonthKey::of(date!(2024 - 02 - 01)),
                income: 10.0,
                expenses: 50.0,
            },
        ];

        assert_eq!(cumulative_net_savings(&trends), vec![60.0, 20.0]);
    }

    #[test]
    fn daily_series_is_zero_filled_and_inclusive() {
        let transactions = vec![
            income(100.0, date!(2024 - 08 - 08)),
            expense(30.0, "Food", date!(2024 - 08 - 10)),
            expense(999.0, "Food", date!(2024 - 08 - 07)),
            expense(999.0, "Food", date!(2024 - 08 - 16)),
        ];

        let series = daily_series(&transactions, date!(2024 - 08 - 15), 7);

        assert_eq!(series.len(), 8);
        assert_eq!(series[0].date, date!(2024 - 08 - 08));
        assert_eq!(series[0].income, 100.0);
        assert_eq!(series[0].balance, 100.0);
        assert_eq!(series[1].income, 0.0);
        assert_eq!(series[1].expenses, 0.0);
        assert_eq!(series[2].expenses, 30.0);
        assert_eq!(series[2].balance, 70.0);
        assert_eq!(series[7].date, date!(2024 - 08 - 15));
        assert_eq!(series[7].balance, 70.0);
    }

    #[test]
    fn daily_series_of_nothing_is_all_zeros() {
        let series = daily_series(&[], date!(2024 - 08 - 15), 30);

        assert_eq!(series.len(), 31);
        assert!(series.iter().all(|day| day.balance == 0.0));
    }

    #[test]
    fn daily_window_defaults_to_ninety_days() {
        assert_eq!(DailyWindow::default().days(), 90);
    }

    #[test]
    fn daily_window_parses_query_values() {
        for window in DailyWindow::ALL {
            let parsed: DailyWindow =
                serde_json::from_str(&format!("\"{}\"", window.as_query_value())).unwrap();
            assert_eq!(parsed, window);
        }
    }
}
