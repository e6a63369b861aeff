//! Chart generation and rendering for the dashboard and analytics pages.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title, VisualMap, VisualMapPiece},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip,
        Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::{
        budget::BudgetComparison,
        category::CategoryAmount,
        payment_method::PaymentMethodShare,
        trend::{DailyCashFlow, DailyWindow, MonthlyTrend, cumulative_net_savings},
    },
    html::HeadElement,
};

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The script tags needed to draw charts, followed by the initialization code.
pub(super) fn chart_head_elements(charts: &[DashboardChart]) -> [HeadElement; 2] {
    [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ]
}

fn month_labels(trends: &[MonthlyTrend]) -> Vec<String> {
    trends.iter().map(|trend| trend.period.short_label()).collect()
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .top(90)
        .contain_label(true)
}

fn currency_value_axis() -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().formatter(currency_formatter()))
}

pub(super) fn income_expenses_chart(trends: &[MonthlyTrend]) -> Chart {
    let income: Vec<f64> = trends.iter().map(|trend| trend.income).collect();
    let expenses: Vec<f64> = trends.iter().map(|trend| trend.expenses).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income vs Expenses")
                .subtext("Most recent months with activity"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(default_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(month_labels(trends)),
        )
        .y_axis(currency_value_axis())
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expenses").data(expenses))
}

pub(super) fn cumulative_savings_chart(trends: &[MonthlyTrend]) -> Chart {
    Chart::new()
        .title(
            Title::new()
                .text("Net Savings")
                .subtext("Running total of income minus expenses"),
        )
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(month_labels(trends)),
        )
        .y_axis(currency_value_axis())
        .visual_map(VisualMap::new().show(false).pieces(vec![
            VisualMapPiece::new().lte(-1).color("red"),
            VisualMapPiece::new().gte(0).color("green"),
        ]))
        .series(
            Line::new()
                .name("Net Savings")
                .area_style(AreaStyle::new())
                .data(cumulative_net_savings(trends)),
        )
}

pub(super) fn daily_cash_flow_chart(series: &[DailyCashFlow], window: DailyWindow) -> Chart {
    let labels: Vec<String> = series.iter().map(|day| day.date.to_string()).collect();
    let income: Vec<f64> = series.iter().map(|day| day.income).collect();
    let expenses: Vec<f64> = series.iter().map(|day| day.expenses).collect();
    let balance: Vec<f64> = series.iter().map(|day| day.balance).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Cash Flow")
                .subtext(format!("Last {}", window.label())),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(currency_value_axis())
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expenses").data(expenses))
        .series(Line::new().name("Balance").data(balance))
}

pub(super) fn category_bar_chart(categories: &[CategoryAmount]) -> Chart {
    // ECharts draws the first category at the bottom, so reverse to put the
    // largest at the top.
    let labels: Vec<String> = categories
        .iter()
        .rev()
        .map(|category| category.category.clone())
        .collect();
    let amounts: Vec<f64> = categories
        .iter()
        .rev()
        .map(|category| category.amount)
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Top Expense Categories")
                .subtext("All time"),
        )
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(currency_value_axis())
        .y_axis(Axis::new().type_(AxisType::Category).data(labels))
        .series(Bar::new().name("Spent").data(amounts))
}

pub(super) fn category_pie_chart(categories: &[CategoryAmount]) -> Chart {
    let data: Vec<(f64, String)> = categories
        .iter()
        .map(|category| (category.amount, category.category.clone()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Spending Breakdown")
                .subtext("Share of the top expense categories"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

pub(super) fn budget_chart(budgets: &[BudgetComparison]) -> Chart {
    let labels: Vec<String> = budgets
        .iter()
        .map(|budget| budget.segment.clone())
        .collect();
    let budgeted: Vec<f64> = budgets.iter().map(|budget| budget.budget).collect();
    let actual: Vec<f64> = budgets.iter().map(|budget| budget.actual).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Budget vs Actual")
                .subtext("Estimated budgets with 10% headroom"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(currency_value_axis())
        .series(Bar::new().name("Budget").data(budgeted))
        .series(Bar::new().name("Actual").data(actual))
}

pub(super) fn payment_method_chart(shares: &[PaymentMethodShare]) -> Chart {
    let data: Vec<(f64, &str)> = shares
        .iter()
        .map(|share| (share.count as f64, share.method))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Payment Methods")
                .subtext("Estimated number of transactions"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Transactions")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
