//! Finboard is a web app for tracking personal income and expenses.
//!
//! Users record income and expense transactions against accounts and view
//! aggregated analytics (net worth, savings rate, category breakdowns, budget
//! vs. actual, trends) as cards and charts.
//!
//! This library provides a REST API that directly serves HTML pages, plus a
//! couple of JSON endpoints for the dashboard figures. The aggregation engine
//! that turns a flat list of transactions into those figures lives in the
//! dashboard module and is exposed through [compute_dashboard_stats] and
//! [compute_analytics_data].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod app_state;
mod auth;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod stores;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use account::{Account, AccountType, NewAccount};
pub use app_state::AppState;
pub use auth::{DEFAULT_IDENTITY_HEADER, UserId, parse_identity_header};
pub use dashboard::{
    AnalyticsData, BudgetComparison, CategoryAmount, DashboardStats, Kpis, MonthKey,
    MonthlyTrend, PaymentMethodShare, compute_analytics_data, compute_dashboard_stats,
};
pub use database_id::{AccountId, DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use stores::{AccountStore, TransactionStore, sqlite::SqliteStore};
pub use transaction::{
    MalformedReason, MalformedRecord, ParsedTransactions, Transaction, TransactionBuilder,
    TransactionRecord, TransactionType, parse_records,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
