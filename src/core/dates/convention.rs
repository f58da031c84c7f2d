use super::format::{calendar_date, parse_iso_date, ISO_PATTERN};
use crate::utils::error::{FeeError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static US_FOUR_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid MM/DD/YYYY regex"));

/// Largest accepted century; chrono stops at year 262142.
pub const MAX_CENTURY: i32 = 262_100;

static US_TWO_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{2})$").expect("valid MM/DD/YY regex"));

/// How a date column is written in an input source.
///
/// Two-digit years carry the century explicitly; the year is never inferred
/// from a pivot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateConvention {
    /// `YYYY-MM-DD`
    Iso,
    /// `MM/DD/YYYY`
    #[default]
    UsFourDigit,
    /// `MM/DD/YY`, year = `century + YY`
    UsTwoDigit { century: i32 },
}

impl DateConvention {
    pub fn pattern(&self) -> &'static str {
        match self {
            DateConvention::Iso => ISO_PATTERN,
            DateConvention::UsFourDigit => "MM/DD/YYYY",
            DateConvention::UsTwoDigit { .. } => "MM/DD/YY",
        }
    }

    /// 依設定名稱建立格式；兩位數年份必須同時給世紀
    pub fn from_name(name: &str, century: Option<i32>) -> Result<Self> {
        let invalid = |reason: String| FeeError::InvalidConfigValueError {
            field: "dates".to_string(),
            value: name.to_string(),
            reason,
        };

        match name.trim() {
            "iso" | "YYYY-MM-DD" => Ok(DateConvention::Iso),
            "us" | "MM/DD/YYYY" => Ok(DateConvention::UsFourDigit),
            "us-short" | "MM/DD/YY" => match century {
                Some(c) if (0..=MAX_CENTURY).contains(&c) && c % 100 == 0 => {
                    Ok(DateConvention::UsTwoDigit { century: c })
                }
                Some(c) => Err(invalid(format!(
                    "century must be a multiple of 100 between 0 and {}, got {}",
                    MAX_CENTURY, c
                ))),
                None => Err(FeeError::MissingConfigError {
                    field: "dates.century".to_string(),
                }),
            },
            other => Err(invalid(format!(
                "unknown date format '{}'; expected one of iso, us, us-short",
                other
            ))),
        }
    }

    pub fn parse(&self, input: &str) -> Result<NaiveDate> {
        match self {
            DateConvention::Iso => parse_iso_date(input),
            DateConvention::UsFourDigit => {
                let caps = US_FOUR_DIGIT
                    .captures(input)
                    .ok_or_else(|| FeeError::parse(input, self.pattern()))?;
                let year: i32 = caps[3]
                    .parse()
                    .map_err(|_| FeeError::parse(input, self.pattern()))?;
                calendar_date(input, self.pattern(), year, &caps[1], &caps[2])
            }
            DateConvention::UsTwoDigit { century } => {
                let caps = US_TWO_DIGIT
                    .captures(input)
                    .ok_or_else(|| FeeError::parse(input, self.pattern()))?;
                let yy: i32 = caps[3]
                    .parse()
                    .map_err(|_| FeeError::parse(input, self.pattern()))?;
                let year = century
                    .checked_add(yy)
                    .ok_or_else(|| FeeError::parse(input, self.pattern()))?;
                calendar_date(input, self.pattern(), year, &caps[1], &caps[2])
            }
        }
    }
}

impl fmt::Display for DateConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateConvention::UsTwoDigit { century } => {
                write!(f, "{} (century {})", self.pattern(), century)
            }
            _ => f.write_str(self.pattern()),
        }
    }
}
