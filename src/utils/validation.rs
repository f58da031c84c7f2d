use crate::utils::error::{FeeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FeeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FeeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FeeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A delimiter must be one ASCII character other than the quote or a line break.
pub fn validate_delimiter(field_name: &str, value: &str) -> Result<()> {
    let reason = match value.as_bytes() {
        [b'"'] | [b'\n'] | [b'\r'] => "quote and line-break characters cannot delimit fields",
        [c] if c.is_ascii() => return Ok(()),
        _ => "delimiter must be a single ASCII character",
    };
    Err(FeeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}

pub fn validate_distinct_paths(input: &str, output: &str) -> Result<()> {
    if input == output {
        return Err(FeeError::InvalidConfigValueError {
            field: "output".to_string(),
            value: output.to_string(),
            reason: "output path must differ from the input path".to_string(),
        });
    }
    Ok(())
}
