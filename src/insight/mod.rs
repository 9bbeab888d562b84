//! Spending insights generated by an external text-generation service.
//!
//! The service takes the selected month's transactions as a JSON array
//! string and answers with one free-text advisory string in Indonesian.
//! [build_insight_request] prepares the payload and [InsightGenerator]
//! abstracts the HTTP call so tests can substitute a canned response.

use std::future::Future;

use serde::{Deserialize, Serialize};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, transaction::Transaction};

/// The date format the insight service expects, e.g. "2024-03-05".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The shape of a single transaction in the insight request payload.
///
/// Mirrors [Transaction] but renders the date as a plain string so the
/// payload is stable regardless of how dates are stored internally.
#[derive(Debug, Serialize)]
struct PayloadTransaction<'a> {
    amount: f64,
    date: String,
    description: &'a str,
    category: &'a str,
    #[serde(rename = "type")]
    transaction_type: &'a str,
}

/// Serialize the transactions of the given month as the insight payload.
///
/// Transactions outside the month are dropped. The result is a JSON array
/// string in the input order, with dates formatted as "YYYY-MM-DD".
///
/// # Errors
/// Returns [Error::NoTransactionsForPeriod] if the month has no
/// transactions, so callers can show a notice without calling the service.
pub fn build_insight_request(
    transactions: &[Transaction],
    year: i32,
    month: Month,
) -> Result<String, Error> {
    let monthly: Vec<PayloadTransaction> = transactions
        .iter()
        .filter(|transaction| {
            transaction.date.year() == year && transaction.date.month() == month
        })
        .map(|transaction| {
            Ok(PayloadTransaction {
                amount: transaction.amount,
                date: format_payload_date(transaction.date)?,
                description: &transaction.description,
                category: transaction.category.key(),
                transaction_type: transaction.transaction_type.key(),
            })
        })
        .collect::<Result<_, Error>>()?;

    if monthly.is_empty() {
        return Err(Error::NoTransactionsForPeriod);
    }

    serde_json::to_string(&monthly).map_err(|error| Error::JSONSerializationError(error.to_string()))
}

fn format_payload_date(date: Date) -> Result<String, Error> {
    date.format(DATE_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), date.to_string()))
}

/// Produces one advisory string for a month's worth of transactions.
///
/// `payload` is the JSON array string built by [build_insight_request].
pub trait InsightGenerator {
    /// Generate an insight for `payload`.
    ///
    /// # Errors
    /// Returns [Error::InsightService] if the service cannot produce a
    /// response.
    fn generate(&self, payload: &str) -> impl Future<Output = Result<String, Error>> + Send;
}

/// The request body the insight service expects.
#[derive(Serialize)]
struct InsightRequest<'a> {
    #[serde(rename = "monthlyTransactions")]
    monthly_transactions: &'a str,
}

/// The response body the insight service answers with.
#[derive(Deserialize)]
struct InsightResponse {
    insight: String,
}

/// An [InsightGenerator] that calls an HTTP text-generation service.
#[derive(Debug, Clone)]
pub struct HttpInsightGenerator {
    url: String,
    client: reqwest::Client,
}

impl HttpInsightGenerator {
    /// Create a client that posts insight requests to `url`.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            client: reqwest::Client::new(),
        }
    }
}

impl InsightGenerator for HttpInsightGenerator {
    async fn generate(&self, payload: &str) -> Result<String, Error> {
        let response = self
            .client
            .post(&self.url)
            .json(&InsightRequest {
                monthly_transactions: payload,
            })
            .send()
            .await
            .map_err(|error| Error::InsightService(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::InsightService(format!(
                "the service answered with status {status}"
            )));
        }

        response
            .json::<InsightResponse>()
            .await
            .map(|body| body.insight)
            .map_err(|error| Error::InsightService(error.to_string()))
    }
}
