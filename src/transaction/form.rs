//! The shared transaction form used by the new and edit pages.
//!
//! The form renders from the raw submitted strings rather than parsed
//! values, so a failed validation can re-render the form with every field
//! exactly as the user typed it and an error message under each invalid
//! field.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::Category,
    database_id::TransactionID,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::{
        MAX_DESCRIPTION_LENGTH, TransactionType,
        validate::{TransactionForm, ValidationError},
    },
};

/// The earliest date the date input accepts.
const MIN_DATE: &str = "1900-01-01";

/// Where the transaction form submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionFormTarget {
    /// POST to the create endpoint.
    Create,
    /// PUT to the update endpoint for the given transaction.
    Update(TransactionID),
}

/// Render the transaction form.
///
/// `values` holds the raw strings to prefill the inputs with. An empty date
/// falls back to `max_date` (today in the server's local timezone) and an
/// unrecognised type falls back to expense, so a blank form starts with
/// sensible defaults. Each violation in `errors` renders an error message
/// under its field.
pub fn transaction_form(
    target: TransactionFormTarget,
    values: &TransactionForm,
    errors: &[ValidationError],
    max_date: Date,
) -> Markup {
    let (hx_post, hx_put, submit_label) = match target {
        TransactionFormTarget::Create => (
            Some(endpoints::TRANSACTIONS_API.to_owned()),
            None,
            "Create Transaction",
        ),
        TransactionFormTarget::Update(transaction_id) => (
            None,
            Some(format_endpoint(endpoints::TRANSACTION, transaction_id)),
            "Update Transaction",
        ),
    };

    let is_income = values.type_.trim() == TransactionType::Income.key();
    let max_date = max_date.to_string();
    let date = if values.date.trim().is_empty() {
        max_date.clone()
    } else {
        values.date.clone()
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#amount, #category, #description, #date, #submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Transaction type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for transaction_type in [TransactionType::Expense, TransactionType::Income] {
                        @let element_id = format!("transaction-type-{}", transaction_type.key());

                        div class="flex items-center gap-3"
                        {
                            input
                                name="type_"
                                id=(element_id)
                                type="radio"
                                value=(transaction_type.key())
                                checked[(transaction_type == TransactionType::Income) == is_income]
                                required
                                tabindex="0"
                                class=(FORM_RADIO_INPUT_STYLE);

                            label
                                for=(element_id)
                                class=(FORM_RADIO_LABEL_STYLE)
                            {
                                (transaction_type.display_name())
                            }
                        }
                    }
                }

                (field_error(errors, ValidationError::InvalidType))
            }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount"
                }

                // w-full needed to ensure input takes the full width when prefilled with a value
                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0"
                        required
                        value=(values.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (field_error(errors, ValidationError::InvalidAmount))
            }

            div
            {
                label
                    for="category"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category"
                }

                select
                    name="category"
                    id="category"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Pilih kategori" }

                    @for category in Category::all() {
                        option
                            value=(category.key())
                            selected[category.key() == values.category.trim()]
                        {
                            (category.display_name())
                        }
                    }
                }

                (field_error(errors, ValidationError::InvalidCategory))
            }

            div
            {
                label
                    for="date"
                    class=(FORM_LABEL_STYLE)
                {
                    "Date"
                }

                input
                    name="date"
                    id="date"
                    type="date"
                    min=(MIN_DATE)
                    max=(max_date)
                    value=(date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(errors, ValidationError::MissingDate))
            }

            div
            {
                label
                    for="description"
                    class=(FORM_LABEL_STYLE)
                {
                    "Description"
                }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="cth: Belanja bulanan, Gaji"
                    maxlength=(MAX_DESCRIPTION_LENGTH)
                    required
                    value=(values.description)
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(errors, ValidationError::InvalidDescription))
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span
                    id="indicator"
                    class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                " " (submit_label)
            }
        }
    }
}

fn field_error(errors: &[ValidationError], field: ValidationError) -> Markup {
    html! {
        @if errors.contains(&field) {
            p class="text-red-500 text-base" { (field) }
        }
    }
}

#[cfg(test)]
mod transaction_form_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{
            assert_form_radio_input, assert_form_select, assert_form_submit_button_with_text,
            assert_hx_endpoint, must_get_form,
        },
        transaction::validate::{TransactionForm, ValidationError},
    };

    use super::{TransactionFormTarget, transaction_form};

    const MAX_DATE: time::Date = date!(2024 - 03 - 05);

    fn render(
        target: TransactionFormTarget,
        values: &TransactionForm,
        errors: &[ValidationError],
    ) -> Html {
        let markup = transaction_form(target, values, errors, MAX_DATE);
        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn create_form_posts_to_transactions_api() {
        let html = render(
            TransactionFormTarget::Create,
            &TransactionForm::default(),
            &[],
        );

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_submit_button_with_text(&form, "Create Transaction");
    }

    #[test]
    fn update_form_puts_to_transaction_endpoint() {
        let html = render(
            TransactionFormTarget::Update(42),
            &TransactionForm::default(),
            &[],
        );

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, &format_endpoint(endpoints::TRANSACTION, 42), "hx-put");
        assert_form_submit_button_with_text(&form, "Update Transaction");
    }

    #[test]
    fn blank_form_defaults_to_expense_and_today() {
        let html = render(
            TransactionFormTarget::Create,
            &TransactionForm::default(),
            &[],
        );

        let form = must_get_form(&html);
        assert_form_radio_input(&form, "type_", "expense", true);
        assert_form_radio_input(&form, "type_", "income", false);

        let date_selector = Selector::parse("input[type=date]").unwrap();
        let date_input = form
            .select(&date_selector)
            .next()
            .expect("want a date input");
        assert_eq!(date_input.value().attr("value"), Some("2024-03-05"));
        assert_eq!(date_input.value().attr("max"), Some("2024-03-05"));
        assert_eq!(date_input.value().attr("min"), Some("1900-01-01"));
    }

    #[test]
    fn form_lists_every_category() {
        let html = render(
            TransactionFormTarget::Create,
            &TransactionForm {
                category: "transport".to_owned(),
                ..TransactionForm::default()
            },
            &[],
        );

        let form = must_get_form(&html);
        assert_form_select(
            &form,
            "category",
            &[
                "food",
                "transport",
                "utilities",
                "salary",
                "entertainment",
                "shopping",
                "healthcare",
                "education",
                "other",
            ],
            "transport",
        );
    }

    #[test]
    fn submitted_values_are_preserved() {
        let values = TransactionForm {
            amount: "-5".to_owned(),
            category: "food".to_owned(),
            description: "Nasi goreng".to_owned(),
            date: "2024-03-01".to_owned(),
            type_: "income".to_owned(),
        };

        let html = render(
            TransactionFormTarget::Create,
            &values,
            &[ValidationError::InvalidAmount],
        );

        let form = must_get_form(&html);
        assert_form_radio_input(&form, "type_", "income", true);

        let amount_selector = Selector::parse("input[name=amount]").unwrap();
        let amount_input = form
            .select(&amount_selector)
            .next()
            .expect("want an amount input");
        assert_eq!(amount_input.value().attr("value"), Some("-5"));

        let description_selector = Selector::parse("input[name=description]").unwrap();
        let description_input = form
            .select(&description_selector)
            .next()
            .expect("want a description input");
        assert_eq!(
            description_input.value().attr("value"),
            Some("Nasi goreng")
        );
    }

    #[test]
    fn violations_render_inline_error_messages() {
        let errors = [
            ValidationError::InvalidAmount,
            ValidationError::InvalidCategory,
            ValidationError::InvalidDescription,
            ValidationError::MissingDate,
            ValidationError::InvalidType,
        ];

        let html = render(
            TransactionFormTarget::Create,
            &TransactionForm::default(),
            &errors,
        );

        let form = must_get_form(&html);
        let paragraph = Selector::parse("p").unwrap();
        let messages = form
            .select(&paragraph)
            .map(|p| p.text().collect::<String>().trim().to_owned())
            .collect::<Vec<_>>();

        for error in errors {
            assert!(
                messages.contains(&error.to_string()),
                "want an inline message for {error:?}, got {messages:?}"
            );
        }
    }

    #[test]
    fn valid_form_renders_no_error_messages() {
        let html = render(
            TransactionFormTarget::Create,
            &TransactionForm::default(),
            &[],
        );

        let form = must_get_form(&html);
        let error_selector = Selector::parse("p.text-red-500").unwrap();
        assert!(
            form.select(&error_selector).next().is_none(),
            "want no inline error messages"
        );
    }
}
