//! Shared layout, style constants and formatting helpers for the HTML pages.

use maud::{DOCTYPE, Markup, html};
use thousands::Separable;

use crate::{
    endpoints,
    navigation::NavBar,
    notice::{Notice, notice_view},
};

pub const APP_NAME: &str = "Cashbook";

// Link styles
pub const LINK_STYLE: &str = "font-semibold leading-6 text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "w-full max-w-md space-y-4 p-6 bg-white rounded-lg \
    shadow dark:bg-gray-800 dark:border dark:border-gray-700";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Card styles
pub const CARD_STYLE: &str = "flex-1 min-w-48 p-4 bg-white rounded-lg shadow dark:bg-gray-800";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center gap-6 px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - " (APP_NAME) }
                link href={ (endpoints::STATIC) "/main.css" } rel="stylesheet";
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href=(endpoints::ROOT)
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// The layout for pages behind the log-in: the navigation bar, the pending notice and
/// the page content under a heading.
pub fn app_page(
    title: &str,
    active_endpoint: &str,
    notice: Option<&Notice>,
    content: &Markup,
) -> Markup {
    let content = html! {
        (NavBar::new(active_endpoint).into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-6"
            {
                h1 class="text-2xl font-bold" { (title) }

                (notice_view(notice))
                (content)
            }
        }
    };

    base(title, &content)
}

/// The centered card shared by the log-in and registration pages.
pub fn log_in_register(form_title: &str, notice: &Markup, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            span class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                (APP_NAME)
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        (form_title)
                    }

                    (notice)
                    (form)
                }
            }
        }
    }
}

/// A labelled form input.
pub fn labelled_input(
    label: &str,
    name: &str,
    type_: &str,
    value: &str,
    required: bool,
) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                type=(type_)
                name=(name)
                id=(name)
                value=(value)
                required[required]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// Format `amount` with thousands separators and two decimal places, e.g. "1,234.50".
pub fn format_amount(amount: f64) -> String {
    // Avoid rendering "-0.00" for tiny negative rounding errors.
    let amount = if amount.abs() < 0.005 { 0.0 } else { amount };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 { "-" } else { "" };

    format!("{sign}{}.{fraction}", whole.separate_with_commas())
}

/// Format `amount` prefixed with the user's currency symbol, e.g. "₱1,234.50".
pub fn format_currency(symbol: &str, amount: f64) -> String {
    let sign = if format_amount(amount).starts_with('-') { "-" } else { "" };

    format!("{sign}{symbol}{}", format_amount(amount.abs()))
}

/// A card showing a labelled monetary figure.
pub fn stat_card(label: &str, value: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p class="text-2xl font-bold" { (value) }
        }
    }
}

#[cfg(test)]
mod format_tests {
    use super::{format_amount, format_currency};

    #[test]
    fn formats_zero() {
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn adds_thousands_separators() {
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
    }

    #[test]
    fn keeps_trailing_zero() {
        assert_eq!(format_amount(12.3), "12.30");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_amount(-1500.5), "-1,500.50");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn sign_goes_before_currency_symbol() {
        assert_eq!(format_currency("₱", 500.0), "₱500.00");
        assert_eq!(format_currency("$", -2500.0), "-$2,500.00");
    }
}
