use chrono::{Datelike, NaiveDate};

use crate::error::RangeError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Zero-based ordinal of a full English month name, `None` when the name is not recognized.
pub fn month_index(month_name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|name| *name == month_name)
        .map(|idx| idx as u32)
}

/// Renders a date as `DD/MM/YYYY`.
pub fn format_date_key(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}

/// Builds an arrival date from the raw booking fields.
///
/// Returns `None` for an unknown month name or a day that does not exist in
/// that month. Out-of-range days are never rolled into the next month.
pub fn arrival_date(year: i32, month_name: &str, day: u32) -> Option<NaiveDate> {
    let month = month_index(month_name)?;
    NaiveDate::from_ymd_opt(year, month + 1, day)
}

/// Parses a user-entered date, either `DD/MM/YYYY` or `YYYY-MM-DD`.
pub fn parse_date(text: &str) -> Result<NaiveDate, RangeError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|_| RangeError::UnparseableDate {
            input: text.to_string(),
        })
}

/// `July/2015` style label used for dataset coverage.
pub fn month_year_label(date: NaiveDate) -> String {
    format!("{}/{}", MONTH_NAMES[date.month0() as usize], date.year())
}
