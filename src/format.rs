//! Formatting helpers for amounts and dates shown in tables and prompts.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The format of date inputs and of dates in data attributes.
pub(crate) const INPUT_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]");

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month]/[day]/[year]");

/// Format `amount` as US dollars with two decimal places, e.g. "$1,234.50"
/// or "-$12.30".
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let cents = cents % 100;

    let dollars = if dollars == 0 {
        // Zero is hardcoded as "0" by numfmt, which is what we want here.
        "0".to_owned()
    } else {
        get_thousands_separator_formatter().fmt_string(dollars)
    };

    let sign = if amount < 0.0 && (dollars != "0" || cents != 0) {
        "-"
    } else {
        ""
    };

    format!("{sign}${dollars}.{cents:02}")
}

/// Format `date` as "MM/DD/YYYY".
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Reformat a "YYYY-MM-DD" date string as "MM/DD/YYYY".
///
/// Strings that are not dates are returned unchanged.
pub fn format_date_str(date: &str) -> String {
    match Date::parse(date, INPUT_DATE_FORMAT) {
        Ok(date) => format_date(date),
        Err(_) => date.to_owned(),
    }
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    })
}
