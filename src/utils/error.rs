use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeeError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Date parse error: '{input}' does not match {expected}")]
    ParseError { input: String, expected: String },

    #[error("Type mismatch for '{field}': expected {expected}, found {found}")]
    TypeMismatchError {
        field: String,
        expected: String,
        found: String,
    },

    #[error("Data format error at line {line}, field '{field}': {message}")]
    DataFormatError {
        line: u64,
        field: String,
        message: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl FeeError {
    pub fn parse(input: &str, expected: &str) -> Self {
        FeeError::ParseError {
            input: input.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FeeError::ParseError { .. } | FeeError::TypeMismatchError { .. } => {
                ErrorCategory::Input
            }
            FeeError::DataFormatError { .. } | FeeError::CsvError(_) => ErrorCategory::Data,
            FeeError::ConfigValidationError { .. }
            | FeeError::InvalidConfigValueError { .. }
            | FeeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FeeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FeeError::ParseError { expected, .. } => {
                format!("請確認日期格式為 {}", expected)
            }
            FeeError::TypeMismatchError { field, expected, .. } => {
                format!("'{}' 需要 {}", field, expected)
            }
            FeeError::DataFormatError { line, field, .. } => {
                format!("請修正輸入檔第 {} 行的 '{}' 欄位後重新執行", line, field)
            }
            FeeError::CsvError(_) => "請確認輸入檔為合法的分隔檔並包含標題列".to_string(),
            FeeError::IoError(_) => "請確認檔案路徑存在且具有讀寫權限".to_string(),
            FeeError::ConfigValidationError { field, .. }
            | FeeError::InvalidConfigValueError { field, .. }
            | FeeError::MissingConfigError { field } => {
                format!("請檢查設定項目 '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FeeError::DataFormatError { line, field, message } => {
                format!("輸入資料錯誤 (第 {} 行, {}): {}", line, field, message)
            }
            FeeError::ParseError { input, .. } => format!("無法解析日期: {}", input),
            FeeError::IoError(e) => format!("檔案存取失敗: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FeeError>;
