use super::range::DateRange;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Pairs each value with a consecutive date, the first value getting `start`.
pub fn add_date_range<I>(values: I, start: &str) -> Result<Vec<(NaiveDate, I::Item)>>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
{
    let values = values.into_iter();
    let range = DateRange::parse(start, values.len())?;
    Ok(range.iter().zip(values).collect())
}
