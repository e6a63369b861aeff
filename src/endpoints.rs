//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/accounts/{account_id}', use [format_endpoint].

use crate::database_id::DatabaseId;

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with this month's figures.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page with the all-time analytics charts.
pub const ANALYTICS_VIEW: &str = "/analytics";
/// The page for displaying a user's transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page for listing and creating accounts.
pub const ACCOUNTS_VIEW: &str = "/accounts";
/// The page for editing an existing account.
pub const EDIT_ACCOUNT_VIEW: &str = "/accounts/{account_id}/edit";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to create accounts.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route to update or delete a single account.
pub const ACCOUNT: &str = "/api/accounts/{account_id}";
/// The route for the dashboard figures as JSON.
pub const DASHBOARD_STATS_API: &str = "/api/dashboard/stats";
/// The route for the analytics figures as JSON.
pub const ANALYTICS_API: &str = "/api/analytics";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/accounts/{account_id}', '{account_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: DatabaseId) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
