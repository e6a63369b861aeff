//! Dashboard module
//!
//! Turns a user's transactions into headline figures and chart data, and
//! serves them as the dashboard and analytics pages and as JSON.
//!
//! The calculations are pure functions of the transactions passed in, see
//! [compute_dashboard_stats] and [compute_analytics_data].

mod aggregation;
mod budget;
mod cards;
mod category;
mod charts;
mod handlers;
mod kpi;
mod payment_method;
mod period;
mod tables;
mod trend;

#[cfg(test)]
mod test_utils;

pub use aggregation::{
    AnalyticsData, DashboardStats, compute_analytics_data, compute_dashboard_stats,
};
pub use budget::BudgetComparison;
pub use category::CategoryAmount;
pub use handlers::{get_analytics, get_analytics_page, get_dashboard_page, get_dashboard_stats};
pub use kpi::Kpis;
pub use payment_method::PaymentMethodShare;
pub use period::MonthKey;
pub use trend::MonthlyTrend;
