//! Table views for dashboard data display.

use maud::{Markup, html};

use crate::{
    dashboard::category::{CategoryAmount, CategoryBreakdown},
    html::{
        CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    transaction::{Transaction, TransactionType},
};

const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for income, red for expenses).
fn amount_color_class(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => TABLE_CELL_GREEN_STYLE,
        TransactionType::Expense => TABLE_CELL_RED_STYLE,
    }
}

fn table_heading(title: &str) -> Markup {
    html! {
        h3 class="text-xl font-semibold mb-4" { (title) }
    }
}

/// The most recent transactions, newest first.
pub(super) fn recent_transactions_table(transactions: &[&Transaction]) -> Markup {
    html! {
        div id="recent-transactions" class="w-full"
        {
            (table_heading("Recent Transactions"))

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (transaction.date) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    (transaction.description.as_deref().unwrap_or(""))
                                }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    @if !transaction.category.is_empty() {
                                        span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
                                    }
                                }
                                td class={(TABLE_CELL_STYLE) " text-right " (amount_color_class(transaction.kind))}
                                {
                                    (format_currency(transaction.signed_amount()))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Total and count per category and transaction type.
pub(super) fn category_breakdown_table(breakdown: &[CategoryBreakdown]) -> Markup {
    html! {
        div id="category-breakdown" class="w-full"
        {
            (table_heading("Categories"))

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Transactions" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Total" }
                        }
                    }

                    tbody
                    {
                        @for row in breakdown {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                                {
                                    (row.category)
                                }
                                td class=(TABLE_CELL_STYLE) { (row.kind) }
                                td class={(TABLE_CELL_STYLE) " text-right"} { (row.count) }
                                td class={(TABLE_CELL_STYLE) " text-right " (amount_color_class(row.kind))}
                                {
                                    (format_currency(row.amount))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Income per category, largest first.
pub(super) fn income_sources_table(sources: &[CategoryAmount]) -> Markup {
    html! {
        div id="income-sources" class="w-full"
        {
            (table_heading("Income Sources"))

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Total" }
                        }
                    }

                    tbody
                    {
                        @for source in sources {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                                {
                                    (source.category)
                                }
                                td class={(TABLE_CELL_STYLE) " text-right " (TABLE_CELL_GREEN_STYLE)}
                                {
                                    (format_currency(source.amount))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        dashboard::{
            category::{CategoryAmount, category_breakdown},
            test_utils::{expense, income},
        },
        transaction::Transaction,
    };

    use super::{category_breakdown_table, income_sources_table, recent_transactions_table};

    fn rows(html: &Html) -> usize {
        let selector = Selector::parse("tbody tr").unwrap();
        html.select(&selector).count()
    }

    #[test]
    fn recent_transactions_show_signed_amounts() {
        let salary = income(5200.5, date!(2024 - 08 - 01));
        let mut rent = expense(1800.5, "Housing", date!(2024 - 08 - 01));
        rent.description = Some("August rent".to_owned());
        let transactions: Vec<&Transaction> = vec![&rent, &salary];

        let html = Html::parse_fragment(&recent_transactions_table(&transactions).into_string());

        assert_eq!(rows(&html), 2);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("August rent"));
        assert!(text.contains("Housing"));
        assert!(text.contains("-$1,800.50") || text.contains("-$1800.50"));
    }

    #[test]
    fn breakdown_table_has_row_per_category_and_type() {
        let transactions = vec![
            expense(10.5, "Gifts", date!(2024 - 08 - 01)),
            expense(15.0, "Gifts", date!(2024 - 08 - 02)),
            income(20.0, date!(2024 - 08 - 03)),
        ];

        let html = Html::parse_fragment(
            &category_breakdown_table(&category_breakdown(&transactions)).into_string(),
        );

        assert_eq!(rows(&html), 2);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("expense"));
        assert!(text.contains("$25.50"));
    }

    #[test]
    fn income_sources_table_lists_sources() {
        let sources = vec![
            CategoryAmount {
                category: "Salary".to_owned(),
                amount: 5200.5,
            },
            CategoryAmount {
                category: "Interest".to_owned(),
                amount: 12.3,
            },
        ];

        let html = Html::parse_fragment(&income_sources_table(&sources).into_string());

        assert_eq!(rows(&html), 2);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("$12.30"));
    }
}
