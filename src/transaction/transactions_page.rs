//! Defines the route handler for the page that lists a user's transactions.

use std::collections::{BTreeSet, HashMap};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    account::Account,
    auth::UserId,
    database_id::AccountId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, CATEGORY_BADGE_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dollar_input_styles,
        edit_delete_action_links, format_currency, loading_spinner,
    },
    navigation::NavBar,
    stores::{AccountStore, TransactionStore, sqlite::SqliteStore},
    timezone::local_now,
    transaction::{
        core::{MalformedRecord, Transaction, TransactionType, parse_records},
        form::{TransactionFormDefaults, transaction_form_fields},
    },
};

/// The state needed for the transactions and edit transaction pages.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The store for the user's transactions and accounts.
    pub store: SqliteStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The distinct categories used in `transactions`, sorted alphabetically.
pub(super) fn known_categories(transactions: &[Transaction]) -> Vec<&str> {
    transactions
        .iter()
        .map(|transaction| transaction.category.as_str())
        .filter(|category| !category.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Renders the page listing the user's transactions, newest first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    user_id: UserId,
) -> Result<Response, Error> {
    let records = state.store.fetch_transactions(&user_id).inspect_err(|error| {
        tracing::error!("could not get transactions for {user_id}: {error}")
    })?;
    let accounts = state
        .store
        .fetch_accounts(&user_id)
        .inspect_err(|error| tracing::error!("could not get accounts for {user_id}: {error}"))?;
    let today = local_now(&state.local_timezone)?.date();

    let mut parsed = parse_records(records);
    parsed
        .transactions
        .sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));

    Ok(transactions_view(
        &parsed.transactions,
        &parsed.skipped,
        &accounts,
        today,
    )
    .into_response())
}

fn transactions_view(
    transactions: &[Transaction],
    malformed: &[MalformedRecord],
    accounts: &[Account],
    today: time::Date,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let account_names: HashMap<AccountId, &str> = accounts
        .iter()
        .map(|account| (account.id, account.name.as_str()))
        .collect();
    let categories = known_categories(transactions);
    let form_fields = transaction_form_fields(
        &TransactionFormDefaults {
            transaction_type: TransactionType::Expense,
            amount: None,
            date: today,
            category: None,
            description: None,
            account_id: None,
            autofocus_amount: true,
        },
        accounts,
        &categories,
    );

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl grid grid-cols-1 lg:grid-cols-3 gap-8"
            {
                section class="lg:col-span-1"
                {
                    form
                        id="create-transaction-form"
                        hx-post=(endpoints::TRANSACTIONS_API)
                        hx-target-error="#alert-container"
                        class="w-full space-y-4"
                    {
                        h2 class="text-xl font-bold" { "New Transaction" }

                        (form_fields)

                        button
                            type="submit"
                            id="submit-button"
                            tabindex="0"
                            class=(BUTTON_PRIMARY_STYLE)
                        {
                            span id="indicator" class="inline htmx-indicator"
                            {
                                (loading_spinner())
                            }
                            " Add Transaction"
                        }
                    }
                }

                section class="lg:col-span-2 space-y-8"
                {
                    @if !malformed.is_empty() {
                        (malformed_records_table(malformed))
                    }

                    (transactions_table(transactions, &account_names))
                }
            }
        }
    );

    base("Transactions", &[dollar_input_styles()], &content)
}

fn transactions_table(
    transactions: &[Transaction],
    account_names: &HashMap<AccountId, &str>,
) -> Markup {
    html!(
        div class="space-y-4"
        {
            h1 class="text-xl font-bold" { "Transactions" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table
                    id="transactions-table"
                    class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Account" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (transaction_row(transaction, account_names))
                        }

                        @if transactions.is_empty() {
                            tr
                            {
                                td
                                    colspan="6"
                                    class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                {
                                    "No transactions yet. Add one with the form."
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn transaction_row(
    transaction: &Transaction,
    account_names: &HashMap<AccountId, &str>,
) -> Markup {
    let account_name = transaction
        .account_id
        .and_then(|id| account_names.get(&id).copied())
        .unwrap_or("");
    let amount_style = match transaction.kind {
        TransactionType::Income => "text-green-600 dark:text-green-400",
        TransactionType::Expense => "text-red-600 dark:text-red-400",
    };

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.description.as_deref().unwrap_or("")) }
            td class=(TABLE_CELL_STYLE)
            {
                @if !transaction.category.is_empty() {
                    span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
                }
            }
            td class=(TABLE_CELL_STYLE) { (account_name) }
            td class={(TABLE_CELL_STYLE) " text-right " (amount_style)}
            {
                (format_currency(transaction.signed_amount()))
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (edit_delete_action_links(
                        &format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id),
                        &format_endpoint(endpoints::TRANSACTION, transaction.id),
                        "Are you sure you want to delete this transaction? This cannot be undone.",
                        "closest tr",
                        "delete",
                    ))
                }
            }
        }
    )
}

/// Records that could not be read, with links for fixing or removing them.
fn malformed_records_table(malformed: &[MalformedRecord]) -> Markup {
    html!(
        div id="malformed-records" class="space-y-4"
        {
            h2 class="text-xl font-bold" { "Needs Attention" }

            p class="text-sm text-gray-600 dark:text-gray-400"
            {
                "These transactions could not be read and are left out of the dashboard
                and analytics. Edit them to fix the problem or delete them."
            }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Problem" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for record in malformed {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (record.id) }
                                td class=(TABLE_CELL_STYLE) { (record.reason) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    div class="flex gap-4"
                                    {
                                        (edit_delete_action_links(
                                            &format_endpoint(
                                                endpoints::EDIT_TRANSACTION_VIEW,
                                                record.id,
                                            ),
                                            &format_endpoint(endpoints::TRANSACTION, record.id),
                                            "Are you sure you want to delete this transaction? \
                                            This cannot be undone.",
                                            "closest tr",
                                            "delete",
                                        ))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        account::NewAccount,
        auth::UserId,
        stores::{AccountStore, TransactionStore, sqlite::SqliteStore},
        test_utils::{
            assert_content_type, assert_hx_endpoint, assert_status_ok,
            assert_transaction_type_inputs, assert_valid_html, must_get_form,
            parse_html_document,
        },
        transaction::core::{Transaction, TransactionType},
    };

    use super::{TransactionsPageState, get_transactions_page, known_categories};

    fn get_test_state() -> TransactionsPageState {
        TransactionsPageState {
            store: SqliteStore::new(Connection::open_in_memory().unwrap()).unwrap(),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn lists_transactions_newest_first() {
        let state = get_test_state();
        let user_id = UserId::new("alice");
        let older = state
            .store
            .create_transaction(
                &user_id,
                Transaction::build(12.3, TransactionType::Expense, date!(2024 - 07 - 01))
                    .category("Food"),
            )
            .unwrap();
        let newer = state
            .store
            .create_transaction(
                &user_id,
                Transaction::build(5200.5, TransactionType::Income, date!(2024 - 08 - 01))
                    .category("Salary"),
            )
            .unwrap();

        let response = get_transactions_page(State(state), user_id).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let rows = Selector::parse("#transactions-table tbody tr[data-transaction-id]").unwrap();
        let ids: Vec<_> = html
            .select(&rows)
            .filter_map(|row| row.value().attr("data-transaction-id"))
            .collect();
        assert_eq!(ids, vec![newer.id.to_string(), older.id.to_string()]);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("-$12.30"));
    }

    #[tokio::test]
    async fn has_create_form() {
        let state = get_test_state();

        let response = get_transactions_page(State(state), UserId::new("alice"))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/transactions", "hx-post");
        assert_transaction_type_inputs(&form, Some("expense"));
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No transactions yet."));
    }

    #[tokio::test]
    async fn offers_the_users_accounts() {
        let state = get_test_state();
        let user_id = UserId::new("alice");
        state
            .store
            .create_account(
                &user_id,
                NewAccount {
                    name: "Everyday".to_owned(),
                    kind: None,
                    balance: None,
                },
            )
            .unwrap();
        state
            .store
            .create_account(
                &UserId::new("bob"),
                NewAccount {
                    name: "Bob's".to_owned(),
                    kind: None,
                    balance: None,
                },
            )
            .unwrap();

        let response = get_transactions_page(State(state), user_id).await.unwrap();

        let html = parse_html_document(response).await;
        let options = Selector::parse("select[name=account_id] option").unwrap();
        let names: Vec<_> = html
            .select(&options)
            .map(|option| option.text().collect::<String>())
            .collect();
        assert_eq!(names, vec!["No account", "Everyday"]);
    }

    #[tokio::test]
    async fn lists_malformed_records_for_repair() {
        let state = get_test_state();
        state
            .store
            .insert_unchecked_transaction("alice", Some("12"), None, Some("2024-08-01"));

        let response = get_transactions_page(State(state), UserId::new("alice"))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let rows = Selector::parse("#malformed-records tbody tr").unwrap();
        assert_eq!(html.select(&rows).count(), 1);
        let edit_link = Selector::parse("#malformed-records a[href$='/edit']").unwrap();
        assert!(html.select(&edit_link).next().is_some());
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("the type is missing"));
    }

    #[test]
    fn known_categories_are_distinct_and_sorted() {
        let build = |category: &str| {
            Transaction::build(1.0, TransactionType::Expense, date!(2024 - 08 - 01))
                .category(category)
                .finalize(1, UserId::new("alice"), time::OffsetDateTime::UNIX_EPOCH)
        };
        let transactions = vec![build("Rent"), build(""), build("Food"), build("Rent")];

        assert_eq!(known_categories(&transactions), vec!["Food", "Rent"]);
    }
}
