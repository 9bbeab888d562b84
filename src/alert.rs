//! Alert fragments for displaying error messages to users.
//!
//! Alerts are returned as the body of error responses. Forms opt in with
//! `hx-target-error="#alert-container"` so the htmx response-targets extension
//! swaps the fragment into the fixed container at the bottom of the page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Build an error alert with a bold `message` and a `details` line.
// Template adapted from https://flowbite.com/docs/components/alerts/
pub fn error_alert(message: &str, details: &str) -> Markup {
    html! {
        div
            class="flex items-start p-4 mb-4 text-red-800 rounded-lg bg-red-50
                dark:bg-gray-800 dark:text-red-400 border border-red-300
                dark:border-red-800 shadow"
            role="alert"
        {
            svg
                class="shrink-0 w-4 h-4 mt-0.5"
                aria-hidden="true"
                xmlns="http://www.w3.org/2000/svg"
                fill="currentColor"
                viewBox="0 0 20 20"
            {
                path
                    d="M10 .5a9.5 9.5 0 1 0 9.5 9.5A9.51 9.51 0 0 0 10 .5ZM9.5 4a1.5 1.5 0 1 1 0 3 1.5 1.5 0 0 1 0-3ZM12 15H8a1 1 0 0 1 0-2h1v-3H8a1 1 0 0 1 0-2h2a1 1 0 0 1 1 1v4h1a1 1 0 0 1 0 2Z" {}
            }

            div class="ms-3 text-sm"
            {
                span class="font-medium" { (message) }

                @if !details.is_empty()
                {
                    p { (details) }
                }
            }

            button
                type="button"
                class="ms-auto -mx-1.5 -my-1.5 bg-red-50 text-red-500 rounded-lg
                    focus:ring-2 focus:ring-red-400 p-1.5 hover:bg-red-200
                    inline-flex items-center justify-center h-8 w-8
                    dark:bg-gray-800 dark:text-red-400 dark:hover:bg-gray-700"
                aria-label="Close"
                onclick="this.closest('[role=alert]').remove()"
            {
                span class="sr-only" { "Close" }

                svg
                    class="w-3 h-3"
                    aria-hidden="true"
                    xmlns="http://www.w3.org/2000/svg"
                    fill="none"
                    viewBox="0 0 14 14"
                {
                    path
                        stroke="currentColor"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        stroke-width="2"
                        d="m1 1 6 6m0 0 6 6M7 7l6-6M7 7l-6 6" {}
                }
            }
        }
    }
}

/// Wrap `alert` in a response with the given `status_code`.
///
/// The response body is the alert fragment only. The client is expected to
/// swap it into `#alert-container` via `hx-target-error`.
pub fn render_alert(status_code: StatusCode, alert: Markup) -> Response {
    (status_code, alert).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::Html;

    use super::{error_alert, render_alert};

    #[test]
    fn error_alert_contains_message_and_details() {
        let alert = error_alert("Something went wrong", "Check the server logs.");

        let fragment = Html::parse_fragment(&alert.into_string());
        let text = fragment.root_element().text().collect::<String>();

        assert!(
            text.contains("Something went wrong"),
            "want alert text to contain message, got {text:?}"
        );
        assert!(
            text.contains("Check the server logs."),
            "want alert text to contain details, got {text:?}"
        );
    }

    #[test]
    fn error_alert_has_alert_role() {
        let alert = error_alert("Oops", "");

        let fragment = Html::parse_fragment(&alert.into_string());
        let selector = scraper::Selector::parse("[role=alert]").unwrap();

        assert!(
            fragment.select(&selector).next().is_some(),
            "want an element with role=alert"
        );
    }

    #[test]
    fn render_alert_sets_status_code() {
        let response = render_alert(StatusCode::NOT_FOUND, error_alert("Not Found", ""));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
