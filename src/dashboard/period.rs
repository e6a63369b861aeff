//! Groups transactions into calendar months.

use std::{cmp::Ordering, collections::BTreeMap, fmt::Display};

use serde::{Serialize, Serializer};
use time::{Date, Month};

use crate::transaction::Transaction;

/// A calendar month, e.g. August 2024.
///
/// Orders chronologically and displays as `{year}-{MM}`, e.g. "2024-08".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    year: i32,
    month: Month,
}

impl MonthKey {
    /// The month that contains `date`.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        self.month
    }

    /// The month before this one, wrapping January to December of the prior year.
    pub fn previous(&self) -> Self {
        let year = match self.month {
            Month::January => self.year - 1,
            _ => self.year,
        };

        Self {
            year,
            month: self.month.previous(),
        }
    }

    fn sort_key(&self) -> (i32, u8) {
        (self.year, self.month as u8)
    }

    /// A short label for chart axes, e.g. "Aug 2024".
    pub fn short_label(&self) -> String {
        let month = match self.month() {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        };

        format!("{month} {}", self.year)
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month as u8)
    }
}

impl PartialOrd for MonthKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Transactions grouped by calendar month, in chronological order.
pub(crate) type MonthBuckets<'a> = BTreeMap<MonthKey, Vec<&'a Transaction>>;

/// The transactions split around a reference date.
#[derive(Debug, Default)]
pub(crate) struct PeriodPartition<'a> {
    /// Transactions in the month containing the reference date.
    pub current_month: Vec<&'a Transaction>,
    /// Transactions in the month before that.
    pub previous_month: Vec<&'a Transaction>,
}

/// Group transactions into calendar months, keeping their relative order
/// within each month.
pub(crate) fn bucket_by_month<'a, I>(transactions: I) -> MonthBuckets<'a>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: MonthBuckets<'a> = BTreeMap::new();

    for transaction in transactions {
        buckets
            .entry(MonthKey::of(transaction.date))
            .or_default()
            .push(transaction);
    }

    buckets
}

/// Split out the transactions in the month containing `reference_date` and
/// the month before it.
///
/// Months are calendar months with inclusive first and last days, not rolling
/// 30 day windows.
pub(crate) fn partition_by_period(
    transactions: &[Transaction],
    reference_date: Date,
) -> PeriodPartition<'_> {
    let current = MonthKey::of(reference_date);
    let previous = current.previous();
    let mut by_month = bucket_by_month(transactions);

    PeriodPartition {
        current_month: by_month.remove(&current).unwrap_or_default(),
        previous_month: by_month.remove(&previous).unwrap_or_default(),
    }
}
