//! Pure aggregation functions for the monthly dashboard.
//!
//! These functions take a slice of transactions and a target month, and never
//! touch the database. Months with no matching transactions produce zero
//! totals rather than errors.

use std::collections::HashMap;

use time::Month;

use crate::{
    category::Category,
    transaction::{Transaction, TransactionType},
};

/// The income, expense and net totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlySummary {
    /// The sum of income amounts in the month.
    pub total_income: f64,
    /// The sum of expense amounts in the month.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub net_balance: f64,
}

/// An expense total for a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

fn in_month(transaction: &Transaction, year: i32, month: Month) -> bool {
    transaction.date.year() == year && transaction.date.month() == month
}

/// Sum the income and expenses of `transactions` that fall in the given month.
///
/// A single pass over the input, no sorting. An empty input or a month with
/// no matches yields all-zero totals.
pub fn summarize_month(transactions: &[Transaction], year: i32, month: Month) -> MonthlySummary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;

    for transaction in transactions
        .iter()
        .filter(|transaction| in_month(transaction, year, month))
    {
        match transaction.transaction_type {
            TransactionType::Income => total_income += transaction.amount,
            TransactionType::Expense => total_expense += transaction.amount,
        }
    }

    MonthlySummary {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
    }
}

/// Sum the month's expenses per category.
///
/// Only expenses count, only categories with a total greater than zero are
/// included, and the output follows [Category::all] order regardless of the
/// input order.
pub fn category_breakdown(
    transactions: &[Transaction],
    year: i32,
    month: Month,
) -> Vec<CategoryTotal> {
    let mut totals: HashMap<Category, f64> = HashMap::new();

    for transaction in transactions.iter().filter(|transaction| {
        in_month(transaction, year, month)
            && transaction.transaction_type == TransactionType::Expense
    }) {
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }

    Category::all()
        .iter()
        .filter_map(|category| {
            totals
                .get(category)
                .filter(|&&total| total > 0.0)
                .map(|&total| CategoryTotal {
                    category: *category,
                    total,
                })
        })
        .collect()
}
