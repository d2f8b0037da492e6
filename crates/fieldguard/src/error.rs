//! Error types
//!
//! Field validation failures are data: a [`ValidationError`] is appended to the
//! field's error list and never aborts a session. The only abrupt signal is
//! [`ValidationFailure`], returned by `execute()` in fail-fast mode.

use crate::result::ValidationResult;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single failed rule for one field (or, for cross-field rules, several
/// fields joined by a comma).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{field_name}: {message}")]
pub struct ValidationError {
    field_name: String,
    message: String,
    code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rejected_value: Option<FieldValue>,
}

impl ValidationError {
    pub fn new(
        field_name: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
            code: code.into(),
            rejected_value: None,
        }
    }

    /// Attach the value that failed the rule. `Null` is recorded as absent.
    pub fn with_rejected_value(mut self, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        self.rejected_value = if value.is_null() { None } else { Some(value) };
        self
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Machine-readable rule identifier, e.g. `"isEmail"`
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn rejected_value(&self) -> Option<&FieldValue> {
        self.rejected_value.as_ref()
    }
}

/// Terminal failure raised by a fail-fast session whose result is invalid.
#[derive(Error, Debug, Clone)]
#[error("Validation failed: {}", .result.error_message())]
pub struct ValidationFailure {
    result: ValidationResult,
}

impl ValidationFailure {
    pub fn new(result: ValidationResult) -> Self {
        Self { result }
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn into_result(self) -> ValidationResult {
        self.result
    }
}

/// Errors raised while constructing a rule from caller-supplied parameters
#[derive(Error, Debug, Clone)]
pub enum RuleError {
    #[error("Invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("Invalid date pattern '{pattern}': {reason}")]
    InvalidDatePattern { pattern: String, reason: String },
}

/// Errors raised while loading a [`crate::ValidatorConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
