//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so that log lines can be
//! grepped and counted without parsing free-form messages.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - VAL_xxx: boundary validation errors
//! - FORM_xxx: form/command errors
//! - CFG_xxx: configuration errors
//! - IO_xxx: filesystem errors (telemetry export)

use crate::models::types::FormField;
use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Validation Errors
    // ============================================
    /// One or more form fields are empty
    FormIncomplete,
    /// Field content does not parse as a number
    FieldNotNumeric,
    /// Parsed value falls outside the declared range
    FieldOutOfRange,

    // ============================================
    // Form/Command Errors
    // ============================================
    /// Field name not recognized
    UnknownField,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value (bad environment variable)
    ConfigInvalidValue,

    // ============================================
    // IO Errors
    // ============================================
    /// Filesystem error during telemetry export
    Io,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FormIncomplete => "VAL_FORM_INCOMPLETE",
            Self::FieldNotNumeric => "VAL_NOT_NUMERIC",
            Self::FieldOutOfRange => "VAL_OUT_OF_RANGE",
            Self::UnknownField => "FORM_UNKNOWN_FIELD",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::Io => "IO_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Check if the error is caused by user input.
    /// User errors surface as transient notices; the form stays editable
    /// and the prior prediction is not altered.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::FormIncomplete | Self::FieldNotNumeric | Self::FieldOutOfRange | Self::UnknownField
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// One or more fields empty at submit
    pub fn form_incomplete(missing: &[FormField]) -> Self {
        let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
        Self::new(
            ErrorCode::FormIncomplete,
            format!("Please fill in all fields. Missing: {}", names.join(", ")),
        )
    }

    /// Field content failed numeric parsing
    pub fn not_numeric(field: FormField, raw: &str) -> Self {
        Self::new(
            ErrorCode::FieldNotNumeric,
            format!("{}: '{}' is not a valid number", field.as_str(), raw),
        )
    }

    /// Integer field received a fractional value
    pub fn not_whole(field: FormField, raw: &str) -> Self {
        Self::new(
            ErrorCode::FieldNotNumeric,
            format!("{}: '{}' must be a whole number", field.as_str(), raw),
        )
    }

    /// Parsed value outside the declared range
    pub fn out_of_range(field: FormField, value: f64, min: f64, max: f64) -> Self {
        Self::new(
            ErrorCode::FieldOutOfRange,
            format!(
                "{}: {} is outside the valid range {}-{}",
                field.as_str(),
                value,
                min,
                max
            ),
        )
    }

    /// Field name not recognized at the prompt
    pub fn unknown_field(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownField,
            format!("Unknown field: '{}'. Type 'help' to list fields.", name),
        )
    }

    /// Bad configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Io, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::Io, "JSON serialization error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::not_numeric(FormField::Glucose, "abc");
        assert_eq!(err.code, ErrorCode::FieldNotNumeric);
        assert_eq!(err.code_str(), "VAL_NOT_NUMERIC");
    }

    #[test]
    fn test_user_input_classification() {
        assert!(ErrorCode::FormIncomplete.is_user_input());
        assert!(ErrorCode::FieldOutOfRange.is_user_input());
        assert!(!ErrorCode::Io.is_user_input());
        assert!(!ErrorCode::ConfigInvalidValue.is_user_input());
    }

    #[test]
    fn test_incomplete_lists_missing_fields() {
        let err = AppError::form_incomplete(&[FormField::Glucose, FormField::Age]);
        assert!(err.message.contains("glucose"));
        assert!(err.message.contains("age"));
    }
}
