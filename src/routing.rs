//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{
        create_account_endpoint, delete_account_endpoint, edit_account_endpoint,
        get_accounts_page, get_edit_account_page,
    },
    auth::UserId,
    dashboard::{get_analytics, get_analytics_page, get_dashboard_page, get_dashboard_stats},
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
///
/// Every route except the static files and the 404 fallback needs the
/// identity header set by the auth provider, see [UserId].
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::ANALYTICS_VIEW, get(get_analytics_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::ACCOUNTS_VIEW, get(get_accounts_page))
        .route(endpoints::EDIT_ACCOUNT_VIEW, get(get_edit_account_page))
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            delete(delete_transaction_endpoint).put(edit_transaction_endpoint),
        )
        .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
        .route(
            endpoints::ACCOUNT,
            delete(delete_account_endpoint).put(edit_account_endpoint),
        )
        .route(endpoints::DASHBOARD_STATS_API, get(get_dashboard_stats))
        .route(endpoints::ANALYTICS_API, get(get_analytics))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page(_user_id: UserId) -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, StatusCode};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{
        AppState,
        endpoints::{self, format_endpoint},
    };

    use super::build_router;

    const IDENTITY_HEADER: &str = "x-forwarded-user";

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Etc/UTC",
            HeaderName::from_static(IDENTITY_HEADER),
        )
        .unwrap();

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let server = get_test_server();
        let response = server
            .get(endpoints::ROOT)
            .add_header(IDENTITY_HEADER, "alice")
            .await;

        response.assert_status_see_other();
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn pages_require_identity_header() {
        let server = get_test_server();

        for endpoint in [
            endpoints::ROOT,
            endpoints::DASHBOARD_VIEW,
            endpoints::ANALYTICS_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::ACCOUNTS_VIEW,
            endpoints::DASHBOARD_STATS_API,
            endpoints::ANALYTICS_API,
        ] {
            let response = server.get(endpoint).expect_failure().await;

            assert_eq!(
                response.status_code(),
                StatusCode::UNAUTHORIZED,
                "want 401 for {endpoint}"
            );
        }
    }

    #[tokio::test]
    async fn pages_load_for_signed_in_user() {
        let server = get_test_server();

        for endpoint in [
            endpoints::DASHBOARD_VIEW,
            endpoints::ANALYTICS_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::ACCOUNTS_VIEW,
        ] {
            let response = server
                .get(endpoint)
                .add_header(IDENTITY_HEADER, "alice")
                .await;

            assert_eq!(
                response.status_code(),
                StatusCode::OK,
                "want 200 for {endpoint}"
            );
        }
    }

    #[tokio::test]
    async fn created_transaction_shows_up_in_stats() {
        let server = get_test_server();

        server
            .post(endpoints::TRANSACTIONS_API)
            .add_header(IDENTITY_HEADER, "alice")
            .form(&[
                ("type_", "income"),
                ("amount", "5200.50"),
                ("date", "2024-08-01"),
                ("category", "Salary"),
                ("description", ""),
            ])
            .await
            .assert_status_see_other();

        let stats: Value = server
            .get(endpoints::DASHBOARD_STATS_API)
            .add_header(IDENTITY_HEADER, "alice")
            .await
            .json();
        assert_eq!(stats["skippedRecords"], 0);

        let transactions_page = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_header(IDENTITY_HEADER, "bob")
            .await
            .text();
        assert!(!transactions_page.contains("Salary"));
    }

    #[tokio::test]
    async fn invalid_transaction_is_rejected_with_alert() {
        let server = get_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .add_header(IDENTITY_HEADER, "alice")
            .form(&[
                ("type_", "expense"),
                ("amount", "12.30"),
                ("date", "2024-08-01"),
                ("category", " "),
            ])
            .expect_failure()
            .await;

        response.assert_status_bad_request();
        assert!(response.text().contains("Category cannot be empty"));
    }

    #[tokio::test]
    async fn account_can_be_edited_over_http() {
        let server = get_test_server();

        server
            .post(endpoints::ACCOUNTS_API)
            .add_header(IDENTITY_HEADER, "alice")
            .form(&[("name", "Everyday"), ("type", ""), ("balance", "")])
            .await
            .assert_status_see_other();

        server
            .put(&format_endpoint(endpoints::ACCOUNT, 1))
            .add_header(IDENTITY_HEADER, "alice")
            .form(&[("name", "Bills"), ("type", "credit"), ("balance", "-42.50")])
            .await
            .assert_status_see_other();

        let edit_page = server
            .get(&format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, 1))
            .add_header(IDENTITY_HEADER, "alice")
            .await;
        edit_page.assert_status_ok();
        assert!(edit_page.text().contains("Bills"));

        let response = server
            .put(&format_endpoint(endpoints::ACCOUNT, 1))
            .add_header(IDENTITY_HEADER, "bob")
            .form(&[("name", "Mine")])
            .expect_failure()
            .await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/nope").expect_failure().await;

        response.assert_status_not_found();
    }
}
