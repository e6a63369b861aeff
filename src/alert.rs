//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTMX out-of-band swaps into the `#alert-container`
//! element that [base](crate::html::base) places on every page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A message shown to the user after an action, e.g. deleting an account.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An action succeeded.
    SuccessSimple {
        /// The headline of the alert.
        message: String,
    },
    /// An action failed, with extra details.
    Error {
        /// The headline of the alert.
        message: String,
        /// More information about what went wrong and how to fix it.
        details: String,
    },
    /// An action failed.
    ErrorSimple {
        /// The headline of the alert.
        message: String,
    },
}

const SUCCESS_STYLE: &str = "flex items-start gap-3 p-4 mb-4 text-sm rounded border \
    text-green-800 border-green-300 bg-green-50 dark:bg-gray-800 dark:text-green-400 \
    dark:border-green-800";

const ERROR_STYLE: &str = "flex items-start gap-3 p-4 mb-4 text-sm rounded border \
    text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 dark:text-red-400 \
    dark:border-red-800";

impl Alert {
    /// Render the alert as an out-of-band swap for the alert container.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, None),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, None),
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(style) role="alert"
                {
                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-auto font-bold"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
