//! Schema catalog errors

use std::io;

use thiserror::Error;

/// Result type for schema catalog operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while loading schema definitions
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema file could not be read
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Schema definition is not valid JSON or has the wrong shape
    #[error("Malformed schema {location}: {reason}")]
    Malformed { location: String, reason: String },

    /// A table declares no fields
    #[error("Table '{0}' declares no fields")]
    EmptyTable(String),

    /// A table declares the same field twice
    #[error("Table '{table}' declares field '{field}' more than once")]
    DuplicateField { table: String, field: String },

    /// A schema with the same name is already registered
    #[error("Schema '{0}' is already registered")]
    DuplicateSchema(String),
}

impl SchemaError {
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code string for CLI output
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::Io { .. } => "AERO_SCHEMA_IO",
            SchemaError::Malformed { .. } => "AERO_SCHEMA_MALFORMED",
            SchemaError::EmptyTable(_) => "AERO_SCHEMA_EMPTY_TABLE",
            SchemaError::DuplicateField { .. } => "AERO_SCHEMA_DUPLICATE_FIELD",
            SchemaError::DuplicateSchema(_) => "AERO_SCHEMA_DUPLICATE",
        }
    }
}
