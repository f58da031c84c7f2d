use crate::core::dates::{add_date_range, reformat_dates, DateRange};
use crate::utils::error::Result;

const OUTPUT_DATE: &str = "%Y-%m-%d";

/// One `DD Mon YYYY` line per input date.
pub fn reformat_lines<S: AsRef<str>>(dates: &[S]) -> Result<Vec<String>> {
    reformat_dates(dates)
}

/// `count` arrives as text so that negative or fractional values surface as
/// a type mismatch instead of an argument-parser error.
pub fn range_lines(start: &str, count: &str) -> Result<Vec<String>> {
    let range = DateRange::parse(start, DateRange::parse_count(count)?)?;
    Ok(range
        .iter()
        .map(|date| date.format(OUTPUT_DATE).to_string())
        .collect())
}

/// `date,value` lines, one per value.
pub fn pair_lines(start: &str, values: Vec<String>) -> Result<Vec<String>> {
    Ok(add_date_range(values, start)?
        .into_iter()
        .map(|(date, value)| format!("{},{}", date.format(OUTPUT_DATE), value))
        .collect())
}
