//! Display formatting for amounts, dates, and month labels.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::MonthKey;

/// Fraction digits shown for every amount.
pub const DISPLAY_PRECISION: u32 = 2;

/// Rounds half-to-even at two decimal places.
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_PRECISION, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(DISPLAY_PRECISION);
    rounded
}

/// Renders `amount` as `<symbol><value>` with exactly two decimals, e.g. `Rs52.50`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = round_for_display(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{}", symbol, rounded.abs())
    } else {
        format!("{}{}", symbol, rounded.abs())
    }
}

/// Table date label, e.g. `05 Mar 2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        short_month_name(date.month()),
        date.year()
    )
}

/// Long date used for the "today" banner, e.g. `March 5, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        month_name(date.month()),
        date.day(),
        date.year()
    )
}

/// Filter option label, e.g. `March 2024`.
pub fn format_month(key: MonthKey) -> String {
    format!("{} {}", month_name(key.month()), key.year())
}

fn short_month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
