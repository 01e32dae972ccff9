//! Result materialization errors and warnings
//!
//! Error codes:
//! - AERO_RESULT_AGGREGATE_CONFLICT (ERROR)
//! - AERO_RESULT_BUFFER_TOO_SMALL (ERROR)
//! - AERO_RESULT_INVALID_RESPONSE (ERROR)
//!
//! Warnings never abort a result; they are collected on the reader.

use std::fmt;

use crate::schema::ColumnType;

/// Severity levels for result errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recovered locally, result still usable
    Warn,
    /// Result unusable
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warn => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Result error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultErrorCode {
    /// Single-value and bucketed aggregations flagged together
    AeroResultAggregateConflict,
    /// Caller buffer shorter than the row
    AeroResultBufferTooSmall,
    /// Backend response body could not be decoded
    AeroResultInvalidResponse,
}

impl ResultErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ResultErrorCode::AeroResultAggregateConflict => "AERO_RESULT_AGGREGATE_CONFLICT",
            ResultErrorCode::AeroResultBufferTooSmall => "AERO_RESULT_BUFFER_TOO_SMALL",
            ResultErrorCode::AeroResultInvalidResponse => "AERO_RESULT_INVALID_RESPONSE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for ResultErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result error with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultError {
    code: ResultErrorCode,
    message: String,
}

impl ResultError {
    /// Both aggregate shapes requested for one response
    pub fn aggregate_conflict() -> Self {
        Self {
            code: ResultErrorCode::AeroResultAggregateConflict,
            message: "Must not mix single value and multi-value aggregations".to_string(),
        }
    }

    /// Caller supplied a buffer shorter than the row
    pub fn buffer_too_small(required: usize, available: usize) -> Self {
        Self {
            code: ResultErrorCode::AeroResultBufferTooSmall,
            message: format!(
                "Row buffer too small: need {} values, have {}",
                required, available
            ),
        }
    }

    /// Backend response could not be decoded
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self {
            code: ResultErrorCode::AeroResultInvalidResponse,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ResultErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ResultError {}

/// Result type for materialization operations
pub type ResultResult<T> = Result<T, ResultError>;

/// Non-fatal anomalies recovered during projection or finalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultWarning {
    /// Selected expression has no matching table field; its column is omitted
    UnresolvedColumn { expression: String },
    /// Declared column type has no coercion rule; the value is left null
    UnsupportedType {
        column: String,
        column_type: ColumnType,
    },
}

impl ResultWarning {
    /// Returns the warning code
    pub fn code(&self) -> &'static str {
        match self {
            ResultWarning::UnresolvedColumn { .. } => "AERO_RESULT_UNRESOLVED_COLUMN",
            ResultWarning::UnsupportedType { .. } => "AERO_RESULT_UNSUPPORTED_TYPE",
        }
    }
}

impl fmt::Display for ResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultWarning::UnresolvedColumn { expression } => write!(
                f,
                "[{}] {}: could not resolve column '{}'",
                Severity::Warn,
                self.code(),
                expression
            ),
            ResultWarning::UnsupportedType {
                column,
                column_type,
            } => write!(
                f,
                "[{}] {}: column '{}' has unsupported type {}",
                Severity::Warn,
                self.code(),
                column,
                column_type
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ResultErrorCode::AeroResultAggregateConflict.code(),
            "AERO_RESULT_AGGREGATE_CONFLICT"
        );
        assert_eq!(
            ResultErrorCode::AeroResultBufferTooSmall.code(),
            "AERO_RESULT_BUFFER_TOO_SMALL"
        );
        assert_eq!(
            ResultErrorCode::AeroResultInvalidResponse.code(),
            "AERO_RESULT_INVALID_RESPONSE"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ResultError::aggregate_conflict();
        let display = format!("{}", err);
        assert!(display.contains("ERROR"));
        assert!(display.contains("AERO_RESULT_AGGREGATE_CONFLICT"));
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn test_buffer_error_message() {
        let err = ResultError::buffer_too_small(3, 1);
        assert_eq!(err.code(), ResultErrorCode::AeroResultBufferTooSmall);
        assert!(err.message().contains("need 3"));
    }

    #[test]
    fn test_warning_display() {
        let warning = ResultWarning::UnsupportedType {
            column: "flag".into(),
            column_type: ColumnType::Bool,
        };
        let display = warning.to_string();
        assert!(display.starts_with("[WARN]"));
        assert!(display.contains("flag"));
        assert!(display.contains("bool"));
    }
}
