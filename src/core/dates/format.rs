use crate::utils::error::{FeeError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// 固定的月份縮寫表，索引 0 為一月
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const ISO_PATTERN: &str = "YYYY-MM-DD";

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid ISO date regex"));

/// Builds a calendar date from already-matched digit groups, reporting the
/// original input when the combination is not a real day (e.g. month 13).
pub(crate) fn calendar_date(
    input: &str,
    expected: &str,
    year: i32,
    month: &str,
    day: &str,
) -> Result<NaiveDate> {
    let month: u32 = month.parse().map_err(|_| FeeError::parse(input, expected))?;
    let day: u32 = day.parse().map_err(|_| FeeError::parse(input, expected))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| FeeError::parse(input, expected))
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    let caps = ISO_DATE
        .captures(input)
        .ok_or_else(|| FeeError::parse(input, ISO_PATTERN))?;
    let year: i32 = caps[1]
        .parse()
        .map_err(|_| FeeError::parse(input, ISO_PATTERN))?;
    calendar_date(input, ISO_PATTERN, year, &caps[2], &caps[3])
}

/// Renders a date as `DD Mon YYYY`.
pub fn format_day_month_year(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `"2001-01-01"` -> `"01 Jan 2001"`
pub fn reformat_date(input: &str) -> Result<String> {
    parse_iso_date(input).map(format_day_month_year)
}

/// 批次轉換，遇到第一個錯誤就中止
pub fn reformat_dates<S: AsRef<str>>(dates: &[S]) -> Result<Vec<String>> {
    dates.iter().map(|d| reformat_date(d.as_ref())).collect()
}
