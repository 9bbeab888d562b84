//! Database initialization.
//!
//! Table creation lives next to the code that owns each table, this module
//! only wires the pieces together inside a single exclusive transaction.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{transaction::create_transaction_table, user::create_user_table};

/// Create the application tables if they do not exist.
///
/// Foreign keys are enforced for the lifetime of `connection` so that rows
/// cannot reference users that do not exist.
///
/// # Errors
///
/// This function will return an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
