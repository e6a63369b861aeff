//! Defines the route handler for the page for editing a transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    auth::UserId,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, dollar_input_styles,
        loading_spinner,
    },
    navigation::NavBar,
    stores::{AccountStore, TransactionStore},
    timezone::local_now,
    transaction::{
        core::{
            MalformedReason, Transaction, TransactionRecord, TransactionType, parse_amount,
            parse_date, parse_records,
        },
        form::{TransactionFormDefaults, transaction_form_fields},
        transactions_page::{TransactionsPageState, known_categories},
    },
};

/// Renders the page for editing a transaction.
///
/// Records that could not be read are shown with what is wrong with them and
/// the fields that could be read filled in, so the user can fix them.
pub async fn get_edit_transaction_page(
    State(state): State<TransactionsPageState>,
    user_id: UserId,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let record = state
        .store
        .get_transaction(&user_id, transaction_id)
        .inspect_err(|error| {
            if *error != Error::NotFound {
                tracing::error!("could not get transaction {transaction_id}: {error}");
            }
        })?;
    let records = state.store.fetch_transactions(&user_id)?;
    let accounts = state.store.fetch_accounts(&user_id)?;
    let today = local_now(&state.local_timezone)?.date();

    let parsed = parse_records(records);
    let categories = known_categories(&parsed.transactions);
    let problem = Transaction::try_from(record.clone())
        .err()
        .map(|malformed| malformed.reason);
    let defaults = prefill(&record, today);
    let form_fields = transaction_form_fields(&defaults, &accounts, &categories);

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let update_url = format_endpoint(endpoints::TRANSACTION, transaction_id);

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-put=(update_url)
                hx-target-error="#alert-container"
                class="w-full max-w-md space-y-4"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                @if let Some(problem) = &problem {
                    (problem_notice(problem))
                }

                (form_fields)

                button
                    type="submit"
                    id="submit-button"
                    tabindex="0"
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                    " Save Transaction"
                }

                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Back to transactions" }
            }
        }
    );

    Ok(base("Edit Transaction", &[dollar_input_styles()], &content).into_response())
}

/// The form values for `record`, keeping whatever parses.
fn prefill(record: &TransactionRecord, today: Date) -> TransactionFormDefaults<'_> {
    TransactionFormDefaults {
        transaction_type: record
            .kind
            .as_deref()
            .and_then(TransactionType::parse)
            .unwrap_or(TransactionType::Expense),
        amount: record
            .amount
            .as_deref()
            .and_then(|amount| parse_amount(amount).ok()),
        date: record
            .date
            .as_deref()
            .and_then(|date| parse_date(date).ok())
            .unwrap_or(today),
        category: record.category.as_deref(),
        description: record.description.as_deref(),
        account_id: record.account_id,
        autofocus_amount: false,
    }
}

fn problem_notice(problem: &MalformedReason) -> Markup {
    html!(
        div
            id="record-problem"
            role="alert"
            class="p-4 text-sm text-yellow-800 rounded-lg bg-yellow-50
                dark:bg-gray-800 dark:text-yellow-300"
        {
            p class="font-medium" { "This transaction could not be read: " (problem) "." }
            p { "Check the fields below and save to fix it." }
        }
    )
}
