use super::format::parse_iso_date;
use crate::utils::error::{FeeError, Result};
use chrono::{Days, NaiveDate};
use serde_json::Value;
use std::iter::FusedIterator;

/// A finite run of consecutive calendar days.
///
/// The range itself is a plain value; every call to [`DateRange::iter`]
/// starts again from the first day, so a range can be walked any number of
/// times. Construction checks that the last day is representable, so the
/// iterator always yields exactly `len` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    len: usize,
}

impl DateRange {
    pub fn new(start: NaiveDate, len: usize) -> Result<Self> {
        if len > 0 {
            start
                .checked_add_days(Days::new(len as u64 - 1))
                .ok_or_else(|| FeeError::ParseError {
                    input: format!("{} + {} days", start, len),
                    expected: "a date range inside the supported calendar".to_string(),
                })?;
        }
        Ok(Self { start, len })
    }

    /// `start` must be `YYYY-MM-DD`.
    pub fn parse(start: &str, len: usize) -> Result<Self> {
        Self::new(parse_iso_date(start)?, len)
    }

    /// Builds a range from loosely typed values (JSON arguments, CLI input).
    /// A non-string start or a count that is not a non-negative integer is a
    /// type mismatch rather than a parse failure.
    pub fn from_values(start: &Value, count: &Value) -> Result<Self> {
        let start = match start {
            Value::String(s) => s.as_str(),
            other => {
                return Err(type_mismatch(
                    "start",
                    "a string in YYYY-MM-DD format",
                    value_kind(other),
                ))
            }
        };

        let len = match count {
            Value::Number(n) if n.is_u64() => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| type_mismatch("n", "an integer that fits in usize", "number"))?,
            Value::Number(n) if n.is_i64() => {
                return Err(type_mismatch("n", "a non-negative integer", "negative integer"))
            }
            other => return Err(type_mismatch("n", "an integer", value_kind(other))),
        };

        Self::parse(start, len)
    }

    /// 解析命令列傳入的天數
    pub fn parse_count(text: &str) -> Result<usize> {
        text.trim()
            .parse::<usize>()
            .map_err(|_| type_mismatch("n", "a non-negative integer", &format!("'{}'", text)))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.len
            .checked_sub(1)
            .and_then(|offset| self.start.checked_add_days(Days::new(offset as u64)))
    }

    pub fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            start: self.start,
            front: 0,
            back: self.len,
        }
    }

    pub fn to_vec(&self) -> Vec<NaiveDate> {
        self.iter().collect()
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> DateRangeIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> DateRangeIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct DateRangeIter {
    start: NaiveDate,
    front: usize,
    back: usize,
}

impl DateRangeIter {
    fn day(&self, offset: usize) -> Option<NaiveDate> {
        self.start.checked_add_days(Days::new(offset as u64))
    }
}

impl Iterator for DateRangeIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.front >= self.back {
            return None;
        }
        let date = self.day(self.front)?;
        self.front += 1;
        Some(date)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for DateRangeIter {
    fn next_back(&mut self) -> Option<NaiveDate> {
        if self.front >= self.back {
            return None;
        }
        let date = self.day(self.back - 1)?;
        self.back -= 1;
        Some(date)
    }
}

impl ExactSizeIterator for DateRangeIter {}

impl FusedIterator for DateRangeIter {}

fn type_mismatch(field: &str, expected: &str, found: &str) -> FeeError {
    FeeError::TypeMismatchError {
        field: field.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
