//! Defines the endpoint that generates a spending insight for one month.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    alert::{error_alert, render_alert},
    insight::{HttpInsightGenerator, InsightGenerator, build_insight_request},
    transaction::get_transactions,
    user::UserID,
};

/// The state needed to generate an insight.
///
/// Generic over the insight generator so tests can substitute a canned
/// response for the HTTP service.
#[derive(Debug)]
pub struct InsightState<G> {
    /// The database connection for loading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client for the insight service.
    pub insight_generator: Arc<G>,
}

// Hand-written so cloning does not require G: Clone.
impl<G> Clone for InsightState<G> {
    fn clone(&self) -> Self {
        Self {
            db_connection: self.db_connection.clone(),
            insight_generator: self.insight_generator.clone(),
        }
    }
}

impl FromRef<AppState> for InsightState<HttpInsightGenerator> {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            insight_generator: state.insight_generator.clone(),
        }
    }
}

/// The month an insight is requested for.
#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    /// The calendar year, e.g. 2024.
    pub year: i32,
    /// The calendar month as a number from 1 to 12.
    pub month: u8,
}

/// The insight fragment swapped into the dashboard's insight section.
fn insight_view(insight: &str) -> Markup {
    html! {
        div class="bg-blue-50 dark:bg-gray-800 border border-blue-200 dark:border-gray-700 rounded-lg p-4"
        {
            h3 class="font-semibold text-blue-800 dark:text-blue-300 mb-1" { "Tips Keuangan" }

            p class="text-sm text-gray-700 dark:text-gray-300" { (insight) }
        }
    }
}

/// The notice shown when the selected month has nothing to analyse.
fn no_transactions_view() -> Markup {
    html! {
        p class="text-sm text-gray-500 dark:text-gray-400"
        {
            "Tidak ada transaksi untuk bulan yang dipilih untuk dianalisis."
        }
    }
}

/// A route handler that asks the insight service about one month's transactions.
///
/// On success the insight fragment is returned as 200 OK so htmx swaps it
/// into the dashboard's insight section. A month with no transactions gets a
/// notice instead, without calling the service. Service failures produce a
/// bad gateway alert.
pub async fn generate_insight_endpoint<G>(
    State(state): State<InsightState<G>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<InsightQuery>,
) -> Response
where
    G: InsightGenerator + Send + Sync,
{
    let Ok(month) = Month::try_from(query.month) else {
        return render_alert(
            StatusCode::BAD_REQUEST,
            error_alert("Invalid month", "The month must be a number from 1 to 12."),
        );
    };

    // The lock must be released before awaiting the insight service.
    let transactions = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_alert_response();
            }
        };

        match get_transactions(user_id, &connection) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::error!("could not retrieve transactions: {error}");
                return error.into_alert_response();
            }
        }
    };

    let payload = match build_insight_request(&transactions, query.year, month) {
        Ok(payload) => payload,
        Err(Error::NoTransactionsForPeriod) => {
            return no_transactions_view().into_response();
        }
        Err(error) => {
            tracing::error!("could not build the insight request: {error}");
            return error.into_alert_response();
        }
    };

    match state.insight_generator.generate(&payload).await {
        Ok(insight) => insight_view(&insight).into_response(),
        Err(error) => error.into_alert_response(),
    }
}
