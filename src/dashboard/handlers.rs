//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard and analytics pages
//! - JSON endpoints that return the same figures
//! - State and query types used by the handlers

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::UserId,
    dashboard::{
        aggregation::{
            AnalyticsData, DashboardStats, compute_analytics_data, compute_dashboard_stats,
            compute_monthly_trends, most_recent, sort_chronologically,
        },
        cards::{analytics_kpi_cards, dashboard_kpi_cards},
        category::{CategoryBreakdown, aggregate_categories, category_breakdown},
        charts::{
            DashboardChart, budget_chart, category_bar_chart, category_pie_chart,
            chart_head_elements, charts_view, cumulative_savings_chart, daily_cash_flow_chart,
            income_expenses_chart, payment_method_chart,
        },
        tables::{category_breakdown_table, income_sources_table, recent_transactions_table},
        trend::{DailyWindow, daily_series},
    },
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    stores::{TransactionStore, sqlite::SqliteStore},
    timezone::local_now,
    transaction::{ParsedTransactions, TransactionType, parse_records},
};

/// How many transactions to list on the dashboard.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed for displaying the dashboard and analytics pages.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The store for reading the user's transactions.
    pub store: SqliteStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string for the dashboard page, e.g. "?range=30d".
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// How many days of cash flow to chart.
    #[serde(default)]
    pub range: DailyWindow,
}

/// The body of the dashboard figures endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    /// The dashboard figures.
    pub stats: DashboardStats,
    /// How many stored transactions were left out because they are malformed.
    pub skipped_records: usize,
}

/// The body of the analytics endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// The analytics figures.
    pub analytics: AnalyticsData,
    /// How many stored transactions were left out because they are malformed.
    pub skipped_records: usize,
    /// Totals per category and transaction type.
    pub category_breakdown: Vec<CategoryBreakdown>,
}

/// Fetch the user's transactions and drop the ones that fail validation.
fn load_transactions<S>(store: &S, user_id: &UserId) -> Result<ParsedTransactions, Error>
where
    S: TransactionStore,
{
    let records = store.fetch_transactions(user_id).inspect_err(|error| {
        tracing::error!("could not get transactions for {user_id}: {error}")
    })?;

    Ok(parse_records(records))
}

/// Display a page with this month's figures, recent cash flow and the latest transactions.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    user_id: UserId,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);
    let parsed = load_transactions(&state.store, &user_id)?;

    if parsed.transactions.is_empty() {
        return Ok(no_data_view(nav_bar, "Dashboard", parsed.skipped_count()).into_response());
    }

    let now = local_now(&state.local_timezone)?;
    let stats = compute_dashboard_stats(&parsed.transactions, now);
    let trends = compute_monthly_trends(&parsed.transactions);
    let daily = daily_series(&parsed.transactions, now.date(), query.range.days());

    let charts = [
        DashboardChart {
            id: "income-expenses-chart",
            options: income_expenses_chart(&trends).to_string(),
        },
        DashboardChart {
            id: "cash-flow-chart",
            options: daily_cash_flow_chart(&daily, query.range).to_string(),
        },
    ];
    let recent = most_recent(&parsed.transactions, RECENT_TRANSACTION_COUNT);

    let content = html!(
        (dashboard_kpi_cards(&stats))
        (range_selector(query.range))
        (charts_view(&charts))
        (recent_transactions_table(&recent))
    );

    Ok(page_view(
        nav_bar,
        "Dashboard",
        &charts,
        parsed.skipped_count(),
        &content,
    )
    .into_response())
}

/// Display a page with charts over the user's whole transaction history.
pub async fn get_analytics_page(
    State(state): State<DashboardState>,
    user_id: UserId,
) -> Result<Response, Error> {
    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW);
    let parsed = load_transactions(&state.store, &user_id)?;

    if parsed.transactions.is_empty() {
        return Ok(no_data_view(nav_bar, "Analytics", parsed.skipped_count()).into_response());
    }

    let analytics = compute_analytics_data(&parsed.transactions);
    let chronological = sort_chronologically(&parsed.transactions);
    let income_sources =
        aggregate_categories(chronological.iter().copied(), TransactionType::Income);
    let breakdown = category_breakdown(chronological.iter().copied());

    let charts = [
        DashboardChart {
            id: "income-expenses-chart",
            options: income_expenses_chart(&analytics.monthly_data).to_string(),
        },
        DashboardChart {
            id: "cumulative-savings-chart",
            options: cumulative_savings_chart(&analytics.monthly_data).to_string(),
        },
        DashboardChart {
            id: "category-bar-chart",
            options: category_bar_chart(&analytics.category_data).to_string(),
        },
        DashboardChart {
            id: "category-pie-chart",
            options: category_pie_chart(&analytics.category_data).to_string(),
        },
        DashboardChart {
            id: "budget-chart",
            options: budget_chart(&analytics.budget_data).to_string(),
        },
        DashboardChart {
            id: "payment-method-chart",
            options: payment_method_chart(&analytics.payment_method_data).to_string(),
        },
    ];

    let content = html!(
        (analytics_kpi_cards(&analytics.kpis))
        (charts_view(&charts))

        div class="grid grid-cols-1 xl:grid-cols-2 gap-4 w-full mb-8"
        {
            (income_sources_table(&income_sources))
            (category_breakdown_table(&breakdown))
        }
    );

    Ok(page_view(
        nav_bar,
        "Analytics",
        &charts,
        parsed.skipped_count(),
        &content,
    )
    .into_response())
}

/// Return the dashboard figures as JSON.
pub async fn get_dashboard_stats(
    State(state): State<DashboardState>,
    user_id: UserId,
) -> Result<Json<DashboardStatsResponse>, Error> {
    let parsed = load_transactions(&state.store, &user_id)?;
    let now = local_now(&state.local_timezone)?;

    Ok(Json(DashboardStatsResponse {
        stats: compute_dashboard_stats(&parsed.transactions, now),
        skipped_records: parsed.skipped_count(),
    }))
}

/// Return the analytics figures as JSON.
pub async fn get_analytics(
    State(state): State<DashboardState>,
    user_id: UserId,
) -> Result<Json<AnalyticsResponse>, Error> {
    let parsed = load_transactions(&state.store, &user_id)?;

    Ok(Json(AnalyticsResponse {
        analytics: compute_analytics_data(&parsed.transactions),
        skipped_records: parsed.skipped_count(),
        category_breakdown: category_breakdown(sort_chronologically(&parsed.transactions)),
    }))
}

/// Links for picking how many days of cash flow to chart.
fn range_selector(selected: DailyWindow) -> Markup {
    const SELECTED_STYLE: &str = "px-3 py-1 text-sm font-medium rounded-lg \
        text-white bg-blue-700 dark:bg-blue-600";
    const UNSELECTED_STYLE: &str = "px-3 py-1 text-sm font-medium rounded-lg \
        text-gray-900 bg-white border border-gray-200 hover:bg-gray-100 \
        dark:bg-gray-800 dark:text-white dark:border-gray-600 dark:hover:bg-gray-700";

    html!(
        nav id="range-selector" class="flex gap-2 self-end mb-2" aria-label="Cash flow range"
        {
            @for window in DailyWindow::ALL {
                @let is_selected = window == selected;

                a
                    href={ (endpoints::DASHBOARD_VIEW) "?range=" (window.as_query_value()) }
                    class=(if is_selected { SELECTED_STYLE } else { UNSELECTED_STYLE })
                    aria-current=[is_selected.then_some("true")]
                {
                    (window.label())
                }
            }
        }
    )
}

/// Tells the user that some stored transactions were left out of the figures.
fn skipped_records_notice(skipped_count: usize) -> Markup {
    let transactions_link = link(endpoints::TRANSACTIONS_VIEW, "transactions page");
    let noun = if skipped_count == 1 {
        "transaction was"
    } else {
        "transactions were"
    };

    html!(
        @if skipped_count > 0 {
            div
                id="skipped-records"
                role="status"
                class="w-full mb-4 p-4 text-sm text-yellow-800 rounded-lg
                    bg-yellow-50 dark:bg-gray-800 dark:text-yellow-300"
            {
                (skipped_count) " " (noun) " left out because they could not be read. "
                "Fix them from the " (transactions_link) "."
            }
        }
    )
}

fn page_view(
    nav_bar: NavBar,
    title: &str,
    charts: &[DashboardChart],
    skipped_count: usize,
    content: &Markup,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            (skipped_records_notice(skipped_count))
            (content)
        }
    );

    base(title, &chart_head_elements(charts), &content)
}

/// Renders a page when the user has no transactions to chart.
fn no_data_view(nav_bar: NavBar, title: &str, skipped_count: usize) -> Markup {
    let nav_bar = nav_bar.into_html();
    let transactions_link = link(endpoints::TRANSACTIONS_VIEW, "transactions page");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            (skipped_records_notice(skipped_count))

            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some transactions.
                You can add transactions from the " (transactions_link) "."
            }
        }
    );

    base(title, &[], &content)
}
