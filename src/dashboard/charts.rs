//! Chart generation and rendering for the dashboard.
//!
//! The dashboard shows a single ECharts pie chart of the selected month's
//! expenses per category. The chart is generated as JSON configuration for
//! the ECharts library and rendered with an HTML container and JavaScript
//! initialization code.

use charming::{
    Chart,
    component::{Legend, Title},
    element::{JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::aggregation::CategoryTotal, html::HeadElement};

/// Slices whose share of the total is below this get no on-slice label.
pub(super) const DEFAULT_LABEL_SHARE_THRESHOLD: f64 = 0.05;

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            @for chart in charts {
                div
                    id=(chart.id)
                    class="min-h-[380px] rounded dark:bg-gray-100"
                {}
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
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

/// The pie chart of one month's expenses per category.
///
/// Slice labels use the Indonesian category names. Slices whose share of
/// the month's expenses is below `label_share_threshold` (a fraction, e.g.
/// 0.05) get no on-slice label but stay in the legend.
pub(super) fn category_pie_chart(
    breakdown: &[CategoryTotal],
    label_share_threshold: f64,
) -> Chart {
    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .map(|total| (total.total, total.category.display_name()))
        .collect();

    Chart::new()
        .title(Title::new().text("Pengeluaran per Kategori"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Pengeluaran")
                .radius("60%")
                .data(data)
                .label(Label::new().formatter(slice_label_formatter(label_share_threshold))),
        )
}

/// A label formatter that hides labels for slices below the threshold.
///
/// ECharts reports `params.percent` in the range 0-100, so the fractional
/// threshold is scaled before comparison.
fn slice_label_formatter(label_share_threshold: f64) -> JsFunction {
    JsFunction::new_with_args(
        "params",
        &format!(
            "return params.percent < {} ? '' : params.name;",
            label_share_threshold * 100.0
        ),
    )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('id-ID', {
              style: 'currency',
              currency: 'IDR',
              maximumFractionDigits: 0
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
