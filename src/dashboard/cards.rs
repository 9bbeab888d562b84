//! The monthly summary cards for the dashboard.
//!
//! Three cards side by side: income, expenses and the net balance for the
//! selected month. The net balance is coloured by its sign.

use maud::{Markup, html};

use crate::{dashboard::aggregation::MonthlySummary, html::format_currency};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

const CARD_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400 mb-1";

/// Renders the income, expense and net balance cards for one month.
pub(super) fn summary_cards_view(summary: &MonthlySummary) -> Markup {
    let net_style = if summary.net_balance < 0.0 {
        "text-red-600 dark:text-red-500"
    } else {
        "text-green-600 dark:text-green-500"
    };

    html! {
        section class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4"
            {
                div class=(CARD_STYLE)
                {
                    div class=(CARD_LABEL_STYLE) { "Pemasukan" }

                    div class="text-2xl font-bold text-green-600 dark:text-green-500"
                    {
                        (format_currency(summary.total_income))
                    }
                }

                div class=(CARD_STYLE)
                {
                    div class=(CARD_LABEL_STYLE) { "Pengeluaran" }

                    div class="text-2xl font-bold text-red-600 dark:text-red-500"
                    {
                        (format_currency(summary.total_expense))
                    }
                }

                div class=(CARD_STYLE)
                {
                    div class=(CARD_LABEL_STYLE) { "Saldo Bersih" }

                    div class=(format!("text-2xl font-bold {net_style}"))
                    {
                        (format_currency(summary.net_balance))
                    }
                }
            }
        }
    }
}
