//! CLI-specific error types
//!
//! Every variant is fatal for the invoked command.

use std::io;

use thiserror::Error;

use crate::request::RequestError;
use crate::results::{ConfigError, ResultError};
use crate::schema::SchemaError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Reader configuration could not be loaded
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Schema file could not be loaded
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Request file is invalid or names an unknown table
    #[error("{0}")]
    Request(String),

    /// Materialization failed
    #[error("{0}")]
    Result(#[from] ResultError),

    /// Reading inputs or writing stdout failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl CliError {
    /// Error code reported on stdout
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "AERO_CLI_CONFIG_ERROR",
            CliError::Schema(e) => e.code(),
            CliError::Request(_) => "AERO_CLI_REQUEST_ERROR",
            CliError::Result(e) => e.code().code(),
            CliError::Io(_) => "AERO_CLI_IO_ERROR",
        }
    }
}

impl From<RequestError> for CliError {
    fn from(e: RequestError) -> Self {
        CliError::Request(e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = CliError::from(ResultError::aggregate_conflict());
        assert_eq!(err.code(), "AERO_RESULT_AGGREGATE_CONFLICT");

        let err = CliError::from(RequestError::UnknownTable {
            schema: "es".to_string(),
            table: "nope".to_string(),
        });
        assert_eq!(err.code(), "AERO_CLI_REQUEST_ERROR");
        assert!(err.to_string().contains("nope"));

        let err = CliError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.code(), "AERO_CLI_IO_ERROR");
    }
}
