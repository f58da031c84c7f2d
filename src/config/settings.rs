use crate::config::toml_config::FeesConfig;
use crate::core::dates::DateConvention;
use crate::core::fees::{validate_daily_rate, DEFAULT_DAILY_RATE};
use crate::domain::model::Money;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct_paths, validate_path, Validate};

/// Fully resolved settings for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    input_path: String,
    output_path: String,
    due: DateConvention,
    returned: DateConvention,
    daily_rate: Money,
    delimiter: u8,
}

impl ReportSettings {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            due: DateConvention::UsFourDigit,
            returned: DateConvention::UsFourDigit,
            daily_rate: DEFAULT_DAILY_RATE,
            delimiter: b',',
        }
    }

    /// 以 TOML 設定覆蓋預設值
    pub fn from_config(
        input_path: impl Into<String>,
        output_path: impl Into<String>,
        config: &FeesConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(input_path, output_path)
            .with_conventions(config.due_convention()?, config.returned_convention()?)
            .with_daily_rate(config.daily_rate()?)
            .with_delimiter(config.delimiter()?))
    }

    pub fn with_conventions(mut self, due: DateConvention, returned: DateConvention) -> Self {
        self.due = due;
        self.returned = returned;
        self
    }

    pub fn with_daily_rate(mut self, daily_rate: Money) -> Self {
        self.daily_rate = daily_rate;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl ConfigProvider for ReportSettings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn due_convention(&self) -> DateConvention {
        self.due
    }

    fn returned_convention(&self) -> DateConvention {
        self.returned
    }

    fn daily_rate(&self) -> Money {
        self.daily_rate
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output", &self.output_path)?;
        validate_distinct_paths(&self.input_path, &self.output_path)?;
        validate_daily_rate(self.daily_rate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FeeError;

    #[test]
    fn test_defaults() {
        let settings = ReportSettings::new("in.csv", "out.csv");
        assert_eq!(settings.input_path(), "in.csv");
        assert_eq!(settings.due_convention(), DateConvention::UsFourDigit);
        assert_eq!(settings.daily_rate(), Money::from_cents(25));
        assert_eq!(settings.delimiter(), b',');
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_config() {
        let config = FeesConfig::from_toml_str(
            "[dates]\nreturned_format = \"us-short\"\ncentury = 2000\n[input]\ndelimiter = \"|\"\n",
        )
        .unwrap();
        let settings = ReportSettings::from_config("in.csv", "out.csv", &config).unwrap();
        assert_eq!(
            settings.returned_convention(),
            DateConvention::UsTwoDigit { century: 2000 }
        );
        assert_eq!(settings.delimiter(), b'|');
    }

    #[test]
    fn test_validation_failures() {
        assert!(ReportSettings::new("", "out.csv").validate().is_err());
        assert!(matches!(
            ReportSettings::new("same.csv", "same.csv").validate(),
            Err(FeeError::InvalidConfigValueError { .. })
        ));
        assert!(ReportSettings::new("in.csv", "out.csv")
            .with_daily_rate(Money::ZERO)
            .validate()
            .is_err());
    }
}
