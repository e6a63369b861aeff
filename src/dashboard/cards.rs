//! Headline figure cards with month on month growth badges.

use maud::{Markup, html};

use crate::{
    dashboard::{aggregation::DashboardStats, kpi::Kpis},
    html::{format_currency, format_percent},
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col justify-between";
const GROWTH_GOOD_STYLE: &str = "text-sm font-medium text-green-600 dark:text-green-400";
const GROWTH_BAD_STYLE: &str = "text-sm font-medium text-red-600 dark:text-red-400";
const GROWTH_NEUTRAL_STYLE: &str = "text-sm font-medium text-gray-600 dark:text-gray-400";

/// Whether an increase in a figure is good news, e.g. income, or bad news,
/// e.g. expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

struct KpiCard {
    title: &'static str,
    value: String,
    /// Percentage change from last month, if the figure has one.
    growth: Option<(f64, Direction)>,
}

/// Formats a growth percentage with its sign, avoiding "-0.0%".
fn format_growth(growth: f64) -> String {
    let rounded = (growth * 10.0).round() / 10.0;

    if rounded > 0.0 {
        format!("+{}", format_percent(rounded))
    } else if rounded < 0.0 {
        format_percent(rounded)
    } else {
        format_percent(0.0)
    }
}

fn growth_style(growth: f64, direction: Direction) -> &'static str {
    let rounded = (growth * 10.0).round() / 10.0;

    match (rounded.partial_cmp(&0.0), direction) {
        (Some(std::cmp::Ordering::Greater), Direction::HigherIsBetter)
        | (Some(std::cmp::Ordering::Less), Direction::LowerIsBetter) => GROWTH_GOOD_STYLE,
        (Some(std::cmp::Ordering::Greater), Direction::LowerIsBetter)
        | (Some(std::cmp::Ordering::Less), Direction::HigherIsBetter) => GROWTH_BAD_STYLE,
        _ => GROWTH_NEUTRAL_STYLE,
    }
}

fn kpi_card(card: &KpiCard) -> Markup {
    html! {
        div class=(CARD_STYLE) data-kpi=(card.title)
        {
            h4 class="text-sm font-semibold text-gray-600 dark:text-gray-400 mb-2" {
                (card.title)
            }

            div class="text-2xl font-bold mb-1" { (card.value) }

            @if let Some((growth, direction)) = card.growth {
                div class=(growth_style(growth, direction)) data-growth {
                    (format_growth(growth)) " from last month"
                }
            }
        }
    }
}

fn cards_grid(cards: &[KpiCard]) -> Markup {
    html! {
        section id="kpi-cards" class="w-full mx-auto mb-6"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                @for card in cards {
                    (kpi_card(card))
                }
            }
        }
    }
}

/// Cards for the dashboard: all-time net worth plus this month's figures,
/// each with its change from last month.
pub(super) fn dashboard_kpi_cards(stats: &DashboardStats) -> Markup {
    cards_grid(&[
        KpiCard {
            title: "Net Worth",
            value: format_currency(stats.net_worth),
            growth: Some((stats.net_worth_growth, Direction::HigherIsBetter)),
        },
        KpiCard {
            title: "Monthly Income",
            value: format_currency(stats.monthly_income),
            growth: Some((stats.income_growth, Direction::HigherIsBetter)),
        },
        KpiCard {
            title: "Monthly Expenses",
            value: format_currency(stats.monthly_expenses),
            growth: Some((stats.expense_growth, Direction::LowerIsBetter)),
        },
        KpiCard {
            title: "Savings Rate",
            value: format_percent(stats.savings_rate),
            growth: Some((stats.savings_growth, Direction::HigherIsBetter)),
        },
    ])
}

/// Cards for the analytics page, covering the whole transaction history.
pub(super) fn analytics_kpi_cards(kpis: &Kpis) -> Markup {
    cards_grid(&[
        KpiCard {
            title: "Total Income",
            value: format_currency(kpis.total_income),
            growth: None,
        },
        KpiCard {
            title: "Total Expenses",
            value: format_currency(kpis.total_expenses),
            growth: None,
        },
        KpiCard {
            title: "Net Savings",
            value: format_currency(kpis.net_savings),
            growth: None,
        },
        KpiCard {
            title: "Savings Rate",
            value: format_percent(kpis.savings_rate),
            growth: None,
        },
    ])
}
