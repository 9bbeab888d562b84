//! Validation of raw transaction form input.
//!
//! The form submits plain strings. [validate] checks every field and reports
//! all violations at once so the form can mark each invalid field inline.

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{category::Category, transaction::TransactionType};

/// The maximum length of a transaction description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 100;

/// The date format used by HTML date inputs, e.g. "2024-03-05".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The raw values submitted by the transaction form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionForm {
    /// The transaction amount as typed, e.g. "12500".
    #[serde(default)]
    pub amount: String,
    /// The selected category key, e.g. "food".
    #[serde(default)]
    pub category: String,
    /// The free-text description.
    #[serde(default)]
    pub description: String,
    /// The date as submitted by the date input, e.g. "2024-03-05".
    #[serde(default)]
    pub date: String,
    /// The selected transaction type key, "income" or "expense".
    #[serde(default)]
    pub type_: String,
}

/// A single violation found while validating a [TransactionForm].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The amount was not a positive number.
    #[error("Amount must be a positive number")]
    InvalidAmount,
    /// The category was not a member of the category registry.
    #[error("Choose a category from the list")]
    InvalidCategory,
    /// The description was empty or longer than [MAX_DESCRIPTION_LENGTH].
    #[error("Description must be between 1 and 100 characters")]
    InvalidDescription,
    /// The date was missing or could not be parsed.
    #[error("Enter a valid date")]
    MissingDate,
    /// The transaction type was not exactly "income" or "expense".
    #[error("Type must be income or expense")]
    InvalidType,
}

/// A transaction candidate whose fields have all passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    pub amount: f64,
    pub date: Date,
    pub description: String,
    pub category: Category,
    pub transaction_type: TransactionType,
}

/// Validate the raw `form` values.
///
/// Fields are checked in declaration order (amount, category, description,
/// date, type) and every violation is reported, so the returned list is
/// deterministic for a given input.
pub fn validate(form: &TransactionForm) -> Result<ValidatedTransaction, Vec<ValidationError>> {
    let mut violations = Vec::new();

    let amount = match form.amount.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Some(amount),
        _ => {
            violations.push(ValidationError::InvalidAmount);
            None
        }
    };

    let category = match Category::from_key(form.category.trim()) {
        Some(category) => Some(category),
        None => {
            violations.push(ValidationError::InvalidCategory);
            None
        }
    };

    let description = form.description.trim();
    if description.is_empty() || description.graphemes(true).count() > MAX_DESCRIPTION_LENGTH {
        violations.push(ValidationError::InvalidDescription);
    }

    let date = match Date::parse(form.date.trim(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(ValidationError::MissingDate);
            None
        }
    };

    let transaction_type = match TransactionType::from_key(form.type_.trim()) {
        Some(transaction_type) => Some(transaction_type),
        None => {
            violations.push(ValidationError::InvalidType);
            None
        }
    };

    match (amount, category, date, transaction_type) {
        (Some(amount), Some(category), Some(date), Some(transaction_type))
            if violations.is_empty() =>
        {
            Ok(ValidatedTransaction {
                amount,
                date,
                description: description.to_owned(),
                category,
                transaction_type,
            })
        }
        _ => Err(violations),
    }
}

#[cfg(test)]
mod validate_tests {
    use time::macros::date;

    use crate::{category::Category, transaction::TransactionType};

    use super::{TransactionForm, ValidationError, validate};

    fn valid_form() -> TransactionForm {
        TransactionForm {
            amount: "12500".to_owned(),
            category: "food".to_owned(),
            description: "Nasi goreng".to_owned(),
            date: "2024-03-05".to_owned(),
            type_: "expense".to_owned(),
        }
    }

    #[test]
    fn valid_form_passes() {
        let validated = validate(&valid_form()).expect("want valid form to pass");

        assert_eq!(validated.amount, 12500.0);
        assert_eq!(validated.category, Category::Food);
        assert_eq!(validated.description, "Nasi goreng");
        assert_eq!(validated.date, date!(2024 - 03 - 05));
        assert_eq!(validated.transaction_type, TransactionType::Expense);
    }

    #[test]
    fn fields_are_trimmed() {
        let form = TransactionForm {
            amount: " 42.5 ".to_owned(),
            description: "  Kopi  ".to_owned(),
            ..valid_form()
        };

        let validated = validate(&form).expect("want trimmed form to pass");

        assert_eq!(validated.amount, 42.5);
        assert_eq!(validated.description, "Kopi");
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for amount in ["0", "-5", "abc", "", "NaN", "inf"] {
            let form = TransactionForm {
                amount: amount.to_owned(),
                ..valid_form()
            };

            assert_eq!(
                validate(&form),
                Err(vec![ValidationError::InvalidAmount]),
                "want InvalidAmount for amount {amount:?}"
            );
        }
    }

    #[test]
    fn rejects_unregistered_category() {
        let form = TransactionForm {
            category: "groceries".to_owned(),
            ..valid_form()
        };

        assert_eq!(validate(&form), Err(vec![ValidationError::InvalidCategory]));
    }

    #[test]
    fn rejects_empty_and_overlong_descriptions() {
        let empty = TransactionForm {
            description: "   ".to_owned(),
            ..valid_form()
        };
        assert_eq!(
            validate(&empty),
            Err(vec![ValidationError::InvalidDescription])
        );

        let overlong = TransactionForm {
            description: "x".repeat(101),
            ..valid_form()
        };
        assert_eq!(
            validate(&overlong),
            Err(vec![ValidationError::InvalidDescription])
        );
    }

    #[test]
    fn accepts_description_at_maximum_length() {
        let form = TransactionForm {
            description: "x".repeat(100),
            ..valid_form()
        };

        assert!(validate(&form).is_ok());
    }

    #[test]
    fn rejects_missing_or_malformed_dates() {
        for date in ["", "05/03/2024", "2024-02-30", "yesterday"] {
            let form = TransactionForm {
                date: date.to_owned(),
                ..valid_form()
            };

            assert_eq!(
                validate(&form),
                Err(vec![ValidationError::MissingDate]),
                "want MissingDate for date {date:?}"
            );
        }
    }

    #[test]
    fn rejects_unrecognised_type() {
        for type_ in ["", "Income", "transfer"] {
            let form = TransactionForm {
                type_: type_.to_owned(),
                ..valid_form()
            };

            assert_eq!(
                validate(&form),
                Err(vec![ValidationError::InvalidType]),
                "want InvalidType for type {type_:?}"
            );
        }
    }

    #[test]
    fn reports_all_violations_in_field_order() {
        let form = TransactionForm {
            amount: "-1".to_owned(),
            category: "nope".to_owned(),
            description: "".to_owned(),
            date: "not a date".to_owned(),
            type_: "transfer".to_owned(),
        };

        assert_eq!(
            validate(&form),
            Err(vec![
                ValidationError::InvalidAmount,
                ValidationError::InvalidCategory,
                ValidationError::InvalidDescription,
                ValidationError::MissingDate,
                ValidationError::InvalidType,
            ])
        );
    }

    #[test]
    fn violations_are_reported_independently() {
        let form = TransactionForm {
            amount: "-1".to_owned(),
            date: "".to_owned(),
            ..valid_form()
        };

        assert_eq!(
            validate(&form),
            Err(vec![
                ValidationError::InvalidAmount,
                ValidationError::MissingDate,
            ])
        );
    }
}
