//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::Category,
    database_id::TransactionID,
    transaction::ValidatedTransaction,
    user::UserID,
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The stable lowercase key used in the database and in form values.
    pub fn key(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Parse a stored or submitted key, e.g. "expense".
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// The Indonesian display label.
    pub fn display_name(&self) -> &'static str {
        match self {
            TransactionType::Income => "Pemasukan",
            TransactionType::Expense => "Pengeluaran",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// A transaction is immutable once created. Edits replace the row wholesale
/// via [update_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionID,
    /// The user who owns this transaction.
    pub user_id: UserID,
    /// The amount of money spent or earned. Always positive, the direction
    /// is carried by `transaction_type`.
    pub amount: f64,
    /// When the transaction happened. A calendar day, no time of day.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: Category,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The number of rows affected by a delete.
pub type RowsAffected = usize;

/// Create a new transaction in the database for `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidUser] if `user_id` does not refer to a registered user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    user_id: UserID,
    details: &ValidatedTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, amount, date, description, category, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, user_id, amount, date, description, category, type",
        )?
        .query_row(
            (
                user_id.as_i64(),
                details.amount,
                details.date,
                &details.description,
                details.category.key(),
                details.transaction_type.key(),
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidUser(user_id),
            error => error.into(),
        })
}

/// Retrieve the transaction with `id` belonging to `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: TransactionID,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, date, description, category, type
             FROM \"transaction\" WHERE id = :id AND user_id = :user_id",
        )?
        .query_one(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve all transactions belonging to `user_id`, most recent date first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions(user_id: UserID, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, date, description, category, type
             FROM \"transaction\" WHERE user_id = :user_id
             ORDER BY date DESC, id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Replace the transaction with `id` belonging to `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionID,
    user_id: UserID,
    details: &ValidatedTransaction,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
         SET amount = ?1, date = ?2, description = ?3, category = ?4, type = ?5
         WHERE id = ?6 AND user_id = ?7",
        params![
            details.amount,
            details.date,
            details.description,
            details.category.key(),
            details.transaction_type.key(),
            id,
            user_id.as_i64(),
        ],
    )?;

    match rows_affected {
        0 => Err(Error::NotFound),
        _ => Ok(()),
    }
}

/// Delete the transaction with `id` belonging to `user_id`.
///
/// Returns the number of rows deleted, which is zero when `id` does not refer
/// to a transaction owned by `user_id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionID,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            params![id, user_id.as_i64()],
        )
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                type TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the transactions page and dashboard queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// A stored category key that is no longer a registry member maps to
/// [Category::Unknown] rather than failing the whole query.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id = UserID::new(row.get(1)?);
    let amount = row.get(2)?;
    let date = row.get(3)?;
    let description = row.get(4)?;
    let raw_category: String = row.get(5)?;
    let raw_type: String = row.get(6)?;

    let category = Category::from_key(&raw_category).unwrap_or(Category::Unknown);
    let transaction_type = TransactionType::from_key(&raw_type).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Text,
            format!("invalid transaction type {raw_type:?}").into(),
        )
    })?;

    Ok(Transaction {
        id,
        user_id,
        amount,
        date,
        description,
        category,
        transaction_type,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::{Connection, params};
    use time::{Date, macros::date};

    use crate::{
        Error,
        category::Category,
        db::initialize,
        transaction::{
            TransactionType, ValidatedTransaction, create_transaction, delete_transaction,
            get_transaction, get_transactions, update_transaction,
        },
        user::{UserID, create_user},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn get_test_user_id(conn: &Connection) -> UserID {
        create_user(
            "test@example.com",
            "Test User",
            crate::PasswordHash::new_unchecked("hunter2"),
            conn,
        )
        .expect("Could not create test user")
        .id
    }

    fn details(amount: f64, date: Date) -> ValidatedTransaction {
        ValidatedTransaction {
            amount,
            date,
            description: "Nasi goreng".to_owned(),
            category: Category::Food,
            transaction_type: TransactionType::Expense,
        }
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let user_id = get_test_user_id(&conn);
        let amount = 12500.0;

        let result = create_transaction(user_id, &details(amount, date!(2024 - 03 - 05)), &conn);

        match result {
            Ok(transaction) => {
                assert!(transaction.id > 0);
                assert_eq!(transaction.user_id, user_id);
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.category, Category::Food);
                assert_eq!(transaction.transaction_type, TransactionType::Expense);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_fails_on_unregistered_user() {
        let conn = get_test_connection();
        let user_id = UserID::new(42);

        let result = create_transaction(user_id, &details(10.0, date!(2024 - 03 - 05)), &conn);

        assert_eq!(result, Err(Error::InvalidUser(user_id)));
    }

    #[test]
    fn get_transactions_orders_by_date_descending() {
        let conn = get_test_connection();
        let user_id = get_test_user_id(&conn);
        let dates = [
            date!(2024 - 02 - 10),
            date!(2024 - 03 - 20),
            date!(2024 - 03 - 01),
        ];
        for date in dates {
            create_transaction(user_id, &details(10.0, date), &conn)
                .expect("Could not create transaction");
        }

        let transactions = get_transactions(user_id, &conn).expect("Could not get transactions");

        let got_dates: Vec<Date> = transactions
            .iter()
            .map(|transaction| transaction.date)
            .collect();
        assert_eq!(
            got_dates,
            vec![
                date!(2024 - 03 - 20),
                date!(2024 - 03 - 01),
                date!(2024 - 02 - 10)
            ]
        );
    }

    #[test]
    fn get_transactions_is_scoped_to_user() {
        let conn = get_test_connection();
        let user_id = get_test_user_id(&conn);
        let other_user_id = create_user(
            "other@example.com",
            "Other User",
            crate::PasswordHash::new_unchecked("hunter2"),
            &conn,
        )
        .expect("Could not create test user")
        .id;
        create_transaction(user_id, &details(10.0, date!(2024 - 03 - 05)), &conn)
            .expect("Could not create transaction");

        let transactions =
            get_transactions(other_user_id, &conn).expect("Could not get transactions");

        assert!(
            transactions.is_empty(),
            "want no transactions for another user, got {transactions:?}"
        );
    }

    #[test]
    fn get_transaction_for_wrong_user_returns_not_found() {
        let conn = get_test_connection();
        let user_id = get_test_user_id(&conn);
        let transaction =
            create_transaction(user_id, &details(10.0, date!(2024 - 03 - 05)), &conn)
                .expect("Could not create transaction");

        let result = get_transaction(transaction.id, UserID::new(999), &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn update_replaces_row() {
        let conn = get_test_connection();
        let user_id = get_test_user_id(&conn);
        let transaction =
            create_transaction(user_id, &details(10.0, date!(2024 - 03 - 05)), &conn)
                .expect("Could not create transaction");
        let new_details = ValidatedTransaction {
            amount: 2_000_000.0,
            date: date!(2024 - 03 - 25),
            description: "Gaji bulanan".to_owned(),
            category: Category::Salary,
            transaction_type: TransactionType::Income,
        };

        update_transaction(transaction.id, user_id, &new_details, &conn)
            .expect("Could not update transaction");

        let got = get_transaction(transaction.id, user_id, &conn)
            .expect("Could not get updated transaction");
        assert_eq!(got.amount, new_details.amount);
        assert_eq!(got.date, new_details.date);
        assert_eq!(got.description, new_details.description);
        assert_eq!(got.category, Category::Salary);
        assert_eq!(got.transaction_type, TransactionType::Income);
    }

    #[test]
    fn update_for_wrong_user_returns_not_found() {
        let conn = get_test_connection();
        let user_id = get_test_user_id(&conn);
        let transaction =
            create_transaction(user_id, &details(10.0, date!(2024 - 03 - 05)), &conn)
                .expect("Could not create transaction");

        let result = update_transaction(
            transaction.id,
            UserID::new(999),
            &details(20.0, date!(2024 - 03 - 06)),
            &conn,
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_reports_rows_affected() {
        let conn = get_test_connection();
        let user_id = get_test_user_id(&conn);
        let transaction =
            create_transaction(user_id, &details(10.0, date!(2024 - 03 - 05)), &conn)
                .expect("Could not create transaction");

        let rows_affected = delete_transaction(transaction.id, user_id, &conn)
            .expect("Could not delete transaction");
        assert_eq!(rows_affected, 1);

        let rows_affected = delete_transaction(transaction.id, user_id, &conn)
            .expect("Could not delete transaction");
        assert_eq!(rows_affected, 0, "want no rows affected on second delete");
    }

    #[test]
    fn unrecognised_stored_category_maps_to_unknown() {
        let conn = get_test_connection();
        let user_id = get_test_user_id(&conn);
        conn.execute(
            "INSERT INTO \"transaction\" (user_id, amount, date, description, category, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id.as_i64(),
                10.0,
                date!(2024 - 03 - 05),
                "Legacy row",
                "groceries",
                "expense"
            ],
        )
        .expect("Could not insert row");

        let transactions = get_transactions(user_id, &conn).expect("Could not get transactions");

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].category, Category::Unknown);
        assert_eq!(transactions[0].category.display_name(), "Tidak Diketahui");
    }
}
