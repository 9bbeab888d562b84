//! Defines the route handler for the page that displays transactions as a table.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, TransactionType, core::get_transactions},
    user::UserID,
};

fn transaction_row(transaction: &Transaction) -> Markup {
    let (amount_text, amount_style) = match transaction.transaction_type {
        TransactionType::Income => (
            format!("+{}", format_currency(transaction.amount)),
            "text-green-600 dark:text-green-500",
        ),
        TransactionType::Expense => (
            format!("-{}", format_currency(transaction.amount)),
            "text-red-600 dark:text-red-500",
        ),
    };

    let confirm_message = format!(
        "Are you sure you want to delete the transaction '{}'? This cannot be undone.",
        transaction.description
    );

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.category.display_name()) }
            td class=(format!("{TABLE_CELL_STYLE} text-right font-medium {amount_style}"))
            {
                (amount_text)
            }
            td class=(format!("{TABLE_CELL_STYLE} text-right"))
            {
                a
                    href=(format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id))
                    class=(LINK_STYLE)
                {
                    "Edit"
                }

                " "

                button
                    hx-delete=(format_endpoint(endpoints::TRANSACTION, transaction.id))
                    hx-confirm=(confirm_message)
                    hx-target="closest tr"
                    hx-swap="delete"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl"
            {
                div class="flex items-center justify-between mb-4"
                {
                    h2 class="text-xl font-bold" { "Transactions" }

                    a
                        href=(endpoints::NEW_TRANSACTION_VIEW)
                        class=(LINK_STYLE)
                    {
                        "New Transaction"
                    }
                }

                @if transactions.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "Belum ada transaksi. Tambah transaksi pertama Anda!"
                    }
                } @else {
                    div class="relative overflow-x-auto shadow-md sm:rounded"
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
                                    th scope="col" class=(format!("{TABLE_CELL_STYLE} text-right")) { "Amount" }
                                    th scope="col" class=(format!("{TABLE_CELL_STYLE} text-right")) { "Actions" }
                                }
                            }

                            tbody
                            {
                                @for transaction in transactions {
                                    (transaction_row(transaction))
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The database connection for loading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page that lists the user's transactions, most recent first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transactions(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not retrieve transactions: {error}"))?
    };

    Ok(transactions_view(&transactions).into_response())
}
