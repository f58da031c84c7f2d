use crate::core::dates::DateConvention;
use crate::domain::model::Money;
use crate::utils::error::{FeeError, Result};
use chrono::NaiveDate;

pub const DEFAULT_DAILY_RATE: Money = Money::from_cents(25);

/// Computes late fees at a fixed per-day rate. Each date column has its own
/// explicit convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeCalculator {
    due: DateConvention,
    returned: DateConvention,
    daily_rate: Money,
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::new(
            DateConvention::UsFourDigit,
            DateConvention::UsFourDigit,
            DEFAULT_DAILY_RATE,
        )
    }
}

impl FeeCalculator {
    pub fn new(due: DateConvention, returned: DateConvention, daily_rate: Money) -> Self {
        Self {
            due,
            returned,
            daily_rate,
        }
    }

    pub fn due_convention(&self) -> DateConvention {
        self.due
    }

    pub fn returned_convention(&self) -> DateConvention {
        self.returned
    }

    pub fn daily_rate(&self) -> Money {
        self.daily_rate
    }

    pub fn parse_due(&self, input: &str) -> Result<NaiveDate> {
        self.due.parse(input)
    }

    pub fn parse_returned(&self, input: &str) -> Result<NaiveDate> {
        self.returned.parse(input)
    }

    /// Whole days between due and return; early or same-day returns are 0.
    pub fn days_late(due: NaiveDate, returned: NaiveDate) -> u64 {
        let days = returned.signed_duration_since(due).num_days();
        u64::try_from(days).unwrap_or(0)
    }

    /// 以日期計算罰金；金額以分為單位，不會有捨入誤差
    pub fn fee_between(&self, due: NaiveDate, returned: NaiveDate) -> Money {
        let days = Self::days_late(due, returned);
        self.daily_rate.saturating_mul(days)
    }

    pub fn late_fee(&self, date_due: &str, date_returned: &str) -> Result<Money> {
        let due = self.parse_due(date_due)?;
        let returned = self.parse_returned(date_returned)?;
        let fee = self.fee_between(due, returned);
        tracing::debug!(
            "Fee for due {} returned {}: {} day(s) late, {}",
            due,
            returned,
            Self::days_late(due, returned),
            fee
        );
        Ok(fee)
    }
}

/// Convenience wrapper using the default `MM/DD/YYYY` convention and 0.25/day.
pub fn late_fee(date_due: &str, date_returned: &str) -> Result<Money> {
    FeeCalculator::default().late_fee(date_due, date_returned)
}

pub(crate) fn validate_daily_rate(rate: Money) -> Result<()> {
    if rate == Money::ZERO {
        return Err(FeeError::InvalidConfigValueError {
            field: "fees.daily_rate".to_string(),
            value: rate.to_string(),
            reason: "daily rate must be greater than zero".to_string(),
        });
    }
    Ok(())
}
