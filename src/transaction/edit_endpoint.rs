//! Defines the endpoint for updating an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    database_id::TransactionID,
    timezone::get_local_offset,
    transaction::{
        core::update_transaction,
        form::{TransactionFormTarget, transaction_form},
        validate::{TransactionForm, validate},
    },
    user::UserID,
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for updating the transaction with `transaction_id`.
///
/// On success the client is redirected to the transactions view. If the form
/// fails validation the form is re-rendered with an error message under each
/// invalid field and the submitted values preserved. Updating a transaction
/// that does not exist or that belongs to another user produces a not found
/// alert.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let Some(local_timezone) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let max_date = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let details = match validate(&form) {
        Ok(details) => details,
        Err(violations) => {
            // 200 OK so htmx swaps the re-rendered form in place of the old one.
            return transaction_form(
                TransactionFormTarget::Update(transaction_id),
                &form,
                &violations,
                max_date,
            )
            .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = update_transaction(transaction_id, user_id, &details, &connection) {
        tracing::error!("could not update transaction {transaction_id}: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod edit_transaction_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;

    use crate::{
        PasswordHash,
        category::Category,
        db::initialize,
        endpoints,
        test_utils::{assert_hx_redirect, parse_html_fragment},
        transaction::{
            Transaction, TransactionType,
            core::{create_transaction, get_transaction},
            validate::{TransactionForm, validate},
        },
        user::{UserID, create_user},
    };

    use super::{EditTransactionState, edit_transaction_endpoint};

    fn get_test_state() -> EditTransactionState {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize(&connection).expect("could not initialize test DB");
        create_user(
            "test@test.com",
            "Test",
            PasswordHash::new_unchecked("hunter2"),
            &connection,
        )
        .expect("could not create test user");

        EditTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn create_test_transaction(state: &EditTransactionState) -> Transaction {
        let details = validate(&TransactionForm {
            amount: "15000".to_owned(),
            category: "transport".to_owned(),
            description: "Ojek ke kantor".to_owned(),
            date: "2024-03-05".to_owned(),
            type_: "expense".to_owned(),
        })
        .expect("want valid test form");

        let connection = state.db_connection.lock().unwrap();
        create_transaction(UserID::new(1), &details, &connection)
            .expect("could not create test transaction")
    }

    fn updated_form() -> TransactionForm {
        TransactionForm {
            amount: "2000000".to_owned(),
            category: "salary".to_owned(),
            description: "Gaji bulanan".to_owned(),
            date: "2024-03-25".to_owned(),
            type_: "income".to_owned(),
        }
    }

    #[tokio::test]
    async fn valid_form_updates_transaction_and_redirects() {
        let state = get_test_state();
        let transaction = create_test_transaction(&state);

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(UserID::new(1)),
            Path(transaction.id),
            Form(updated_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);

        let connection = state.db_connection.lock().unwrap();
        let updated = get_transaction(transaction.id, UserID::new(1), &connection)
            .expect("could not get updated transaction");
        assert_eq!(updated.amount, 2_000_000.0);
        assert_eq!(updated.description, "Gaji bulanan");
        assert_eq!(updated.category, Category::Salary);
        assert_eq!(updated.transaction_type, TransactionType::Income);
    }

    #[tokio::test]
    async fn invalid_form_rerenders_without_updating() {
        let state = get_test_state();
        let transaction = create_test_transaction(&state);
        let form = TransactionForm {
            amount: "not a number".to_owned(),
            ..updated_form()
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(UserID::new(1)),
            Path(transaction.id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        let error_selector = scraper::Selector::parse("p.text-red-500").unwrap();
        let messages = html
            .select(&error_selector)
            .map(|p| p.text().collect::<String>().trim().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec!["Amount must be a positive number".to_owned()],
            "want exactly the amount error message"
        );

        let connection = state.db_connection.lock().unwrap();
        let stored = get_transaction(transaction.id, UserID::new(1), &connection)
            .expect("could not get transaction");
        assert_eq!(
            stored.description, "Ojek ke kantor",
            "want the stored transaction unchanged"
        );
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = get_test_state();

        let response = edit_transaction_endpoint(
            State(state),
            Extension(UserID::new(1)),
            Path(999),
            Form(updated_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn other_users_transaction_is_not_found() {
        let state = get_test_state();
        let transaction = create_test_transaction(&state);
        {
            let connection = state.db_connection.lock().unwrap();
            create_user(
                "other@test.com",
                "Other",
                PasswordHash::new_unchecked("hunter2"),
                &connection,
            )
            .expect("could not create second test user");
        }

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(UserID::new(2)),
            Path(transaction.id),
            Form(updated_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let connection = state.db_connection.lock().unwrap();
        let stored = get_transaction(transaction.id, UserID::new(1), &connection)
            .expect("could not get transaction");
        assert_eq!(
            stored.description, "Ojek ke kantor",
            "want the owner's transaction unchanged"
        );
    }
}
