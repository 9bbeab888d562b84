//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and database functions for storing, querying,
//!   and managing transactions
//! - Validation of the transaction form
//! - View handlers for transaction-related web pages

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod transactions_page;
mod validate;

pub use core::{
    Transaction, TransactionType, create_transaction, create_transaction_table, delete_transaction,
    get_transaction, get_transactions, map_transaction_row, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use transactions_page::get_transactions_page;
pub use validate::{
    MAX_DESCRIPTION_LENGTH, TransactionForm, ValidatedTransaction, ValidationError, validate,
};
