use crate::utils::error::{FeeError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Non-negative amount of money held as whole cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn saturating_mul(self, factor: u64) -> Money {
        Money(self.0.saturating_mul(factor))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = FeeError;

    /// 接受 "1"、"0.5"、"0.25" 這類字串，小數最多兩位
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| FeeError::InvalidConfigValueError {
            field: "money".to_string(),
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (units, fraction) = match trimmed.split_once('.') {
            Some((_, "")) => return Err(invalid("expected digits after the decimal point")),
            Some((u, f)) => (u, f),
            None => (trimmed, ""),
        };

        if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a non-negative decimal amount"));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let units: u64 = units
            .parse()
            .map_err(|_| invalid("amount is too large"))?;
        // 小數位已確認為數字，直接換算成分
        let cents = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(2)
            .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }
}

impl Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 已解析的還書紀錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRecord {
    pub patron_id: String,
    pub date_due: NaiveDate,
    pub date_returned: NaiveDate,
}

/// Row as it appears in the input file; every column is optional so that a
/// missing value can be reported with its line number instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReturnRow {
    pub patron_id: Option<String>,
    pub date_due: Option<String>,
    pub date_returned: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeEntry {
    pub patron_id: String,
    pub late_fees: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeReport {
    pub entries: Vec<FeeEntry>,
    pub records_processed: usize,
}

impl FeeReport {
    pub fn total(&self) -> Money {
        self.entries
            .iter()
            .fold(Money::ZERO, |acc, entry| acc + entry.late_fees)
    }

    pub fn fee_for(&self, patron_id: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|e| e.patron_id == patron_id)
            .map(|e| e.late_fees)
    }
}
