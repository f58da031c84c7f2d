use crate::core::dates::DateConvention;
use crate::core::fees::validate_daily_rate;
use crate::domain::model::Money;
use crate::utils::error::{FeeError, Result};
use crate::utils::validation::{validate_delimiter, validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder regex"));

/// Optional settings file for the report command. Every section may be
/// omitted; the defaults match the `MM/DD/YYYY` library export at 0.25/day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeesConfig {
    pub dates: DatesConfig,
    pub fees: FeesSection,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatesConfig {
    pub due_format: String,
    pub returned_format: String,
    /// 兩位數年份所屬世紀，例如 2000
    pub century: Option<i32>,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            due_format: "us".to_string(),
            returned_format: "us".to_string(),
            century: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeesSection {
    pub daily_rate: String,
}

impl Default for FeesSection {
    fn default() -> Self {
        Self {
            daily_rate: "0.25".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub delimiter: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
        }
    }
}

impl FeesConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FeeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FeeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LATE_FEE_RATE})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn due_convention(&self) -> Result<DateConvention> {
        DateConvention::from_name(&self.dates.due_format, self.dates.century).map_err(|e| {
            relabel(e, "dates.due_format")
        })
    }

    pub fn returned_convention(&self) -> Result<DateConvention> {
        DateConvention::from_name(&self.dates.returned_format, self.dates.century)
            .map_err(|e| relabel(e, "dates.returned_format"))
    }

    pub fn daily_rate(&self) -> Result<Money> {
        self.fees
            .daily_rate
            .parse::<Money>()
            .map_err(|e| relabel(e, "fees.daily_rate"))
    }

    /// `"tab"` and `"\t"` both mean a tab character.
    pub fn delimiter(&self) -> Result<u8> {
        let raw = match self.input.delimiter.as_str() {
            "tab" | "\\t" => "\t",
            other => other,
        };
        validate_delimiter("input.delimiter", raw)?;
        Ok(raw.as_bytes()[0])
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("dates.due_format", &self.dates.due_format)?;
        validate_non_empty_string("dates.returned_format", &self.dates.returned_format)?;
        self.due_convention()?;
        self.returned_convention()?;
        validate_daily_rate(self.daily_rate()?)?;
        self.delimiter()?;
        Ok(())
    }
}

impl Validate for FeesConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

fn relabel(err: FeeError, field: &str) -> FeeError {
    match err {
        FeeError::InvalidConfigValueError { value, reason, .. } => {
            FeeError::InvalidConfigValueError {
                field: field.to_string(),
                value,
                reason,
            }
        }
        other => other,
    }
}
