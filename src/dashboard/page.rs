//! Defines the route handler for the monthly dashboard page.
//!
//! The dashboard shows one calendar month at a time: summary cards, the
//! category pie chart and the on-demand insight section. The month is
//! selected with `?year=` and `?month=` query parameters and defaults to
//! the current month in the server's local timezone.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Month, OffsetDateTime};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{CategoryTotal, MonthlySummary, category_breakdown, summarize_month},
        cards::summary_cards_view,
        charts::{
            DEFAULT_LABEL_SHARE_THRESHOLD, DashboardChart, category_pie_chart, charts_script,
            charts_view,
        },
    },
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, HeadElement, LINK_STYLE, base, format_month_label, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::get_transactions,
    user::UserID,
};

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardPageState {
    /// The database connection for loading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The month selected with the dashboard's navigation links.
///
/// Both fields must be present to select a month, otherwise the dashboard
/// falls back to the current month.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// The calendar year, e.g. 2024.
    #[serde(default)]
    pub year: Option<i32>,
    /// The calendar month as a number from 1 to 12.
    #[serde(default)]
    pub month: Option<u8>,
}

fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}

fn next_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::December => (year + 1, Month::January),
        month => (year, month.next()),
    }
}

fn month_href(year: i32, month: Month) -> String {
    format!(
        "{}?year={year}&month={}",
        endpoints::DASHBOARD_VIEW,
        u8::from(month)
    )
}

/// The month label with previous/next navigation links.
///
/// The next link is disabled on the current month so the user cannot
/// navigate into the future.
fn month_selector_view(year: i32, month: Month, is_current_month: bool) -> Markup {
    let (previous_year, previous) = previous_month(year, month);
    let (next_year, next) = next_month(year, month);

    html! {
        section class="w-full mx-auto mb-4"
        {
            div class="flex items-center justify-center gap-4"
            {
                a
                    href=(month_href(previous_year, previous))
                    aria-label="Bulan sebelumnya"
                    class=(LINK_STYLE)
                {
                    "‹"
                }

                h2 class="text-xl font-bold" { (format_month_label(year, month)) }

                @if is_current_month {
                    span
                        aria-disabled="true"
                        class="text-gray-400 dark:text-gray-600"
                    {
                        "›"
                    }
                } @else {
                    a
                        href=(month_href(next_year, next))
                        aria-label="Bulan berikutnya"
                        class=(LINK_STYLE)
                    {
                        "›"
                    }
                }
            }
        }
    }
}

/// The insight section: a button that asks the service about the selected
/// month and a target container the response fragment is swapped into.
fn insight_section(year: i32, month: Month) -> Markup {
    let insight_endpoint = format!(
        "{}?year={year}&month={}",
        endpoints::INSIGHT_API,
        u8::from(month)
    );

    html! {
        section class="w-full mx-auto mb-4"
        {
            button
                hx-post=(insight_endpoint)
                hx-target="#insight"
                hx-swap="innerHTML"
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                hx-disabled-elt="this"
                class=(BUTTON_SECONDARY_STYLE)
            {
                span id="indicator" class="htmx-indicator" { (loading_spinner()) }

                "Dapatkan Tips Keuangan"
            }

            div id="insight" class="mt-2" {}
        }
    }
}

fn dashboard_view(
    year: i32,
    month: Month,
    is_current_month: bool,
    summary: &MonthlySummary,
    breakdown: &[CategoryTotal],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let charts = if breakdown.is_empty() {
        vec![]
    } else {
        vec![DashboardChart {
            id: "category-pie-chart",
            options: category_pie_chart(breakdown, DEFAULT_LABEL_SHARE_THRESHOLD).to_string(),
        }]
    };

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
            max-w-screen-md text-gray-900 dark:text-white"
        {
            (month_selector_view(year, month, is_current_month))

            (summary_cards_view(summary))

            @if charts.is_empty() {
                p class="text-gray-500 dark:text-gray-400 mb-4"
                {
                    "Belum ada pengeluaran untuk bulan ini."
                }
            } @else {
                (charts_view(&charts))
            }

            (insight_section(year, month))
        }
    );

    let scripts = if charts.is_empty() {
        vec![]
    } else {
        vec![
            HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
            charts_script(&charts),
        ]
    };

    base("Dashboard", &scripts, &content)
}

/// Renders the dashboard for the selected month.
///
/// A month outside 1 to 12 produces the not found page.
pub async fn get_dashboard_page(
    State(state): State<DashboardPageState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let (year, month) = match (query.year, query.month) {
        (Some(year), Some(month)) => (year, Month::try_from(month).map_err(|_| Error::NotFound)?),
        _ => (today.year(), today.month()),
    };

    let is_current_month = year == today.year() && month == today.month();

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transactions(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not retrieve transactions: {error}"))?
    };

    let summary = summarize_month(&transactions, year, month);
    let breakdown = category_breakdown(&transactions, year, month);

    Ok(dashboard_view(year, month, is_current_month, &summary, &breakdown).into_response())
}
