//! Defines the route handler for the page for editing a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    database_id::TransactionID,
    html::{FORM_CONTAINER_STYLE, base, rupiah_input_styles},
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::{
        Transaction,
        core::get_transaction,
        form::{TransactionFormTarget, transaction_form},
        validate::TransactionForm,
    },
    user::UserID,
};

/// Render an amount for the number input, without a trailing ".0" for whole
/// Rupiah amounts.
fn format_amount_value(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        amount.to_string()
    }
}

/// The raw form values prefilled from a stored transaction.
fn form_values(transaction: &Transaction) -> TransactionForm {
    TransactionForm {
        amount: format_amount_value(transaction.amount),
        category: transaction.category.key().to_owned(),
        description: transaction.description.clone(),
        date: transaction.date.to_string(),
        type_: transaction.transaction_type.key().to_owned(),
    }
}

fn edit_transaction_view(transaction: &Transaction, max_date: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let form = transaction_form(
        TransactionFormTarget::Update(transaction.id),
        &form_values(transaction),
        &[],
        max_date,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Edit Transaction" }

            (form)
        }
    };

    base("Edit Transaction", &[rupiah_input_styles()], &content)
}

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
    /// The database connection for loading the transaction.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing a transaction, prefilled with its stored
/// values.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionID>,
) -> Result<Response, Error> {
    let transaction = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transaction(transaction_id, user_id, &connection).inspect_err(|error| {
            tracing::error!("could not retrieve transaction {transaction_id}: {error}")
        })?
    };

    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let max_date = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    Ok(edit_transaction_view(&transaction, max_date).into_response())
}
