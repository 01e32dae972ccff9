//! Result reader configuration
//!
//! Controls where per-document values are read from and how bucketed
//! aggregations are named in the backend response.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result reader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Fields read from the hit root instead of the source sub-tree
    #[serde(default = "default_meta_fields")]
    pub meta_fields: Vec<String>,

    /// Sub-tree holding user fields (default: "_source")
    #[serde(default = "default_source_prefix")]
    pub source_prefix: String,

    /// Aggregation name prefix for GROUP BY expressions (default: "group_by_")
    #[serde(default = "default_group_by_prefix")]
    pub group_by_prefix: String,

    /// Minimum severity emitted by the default diagnostics sink
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_meta_fields() -> Vec<String> {
    vec!["_id".to_string(), "_type".to_string(), "_score".to_string()]
}

fn default_source_prefix() -> String {
    "_source".to_string()
}

fn default_group_by_prefix() -> String {
    "group_by_".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            meta_fields: default_meta_fields(),
            source_prefix: default_source_prefix(),
            group_by_prefix: default_group_by_prefix(),
            log_level: default_log_level(),
        }
    }
}

impl ReaderConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: ReaderConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "source_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.group_by_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "group_by_prefix",
                reason: "must not be empty".to_string(),
            });
        }
        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        Severity::parse(&self.log_level).ok_or_else(|| ConfigError::Invalid {
            field: "log_level",
            reason: format!("unknown level '{}'", self.log_level),
        })
    }

    /// Returns true if `name` is read from the hit root
    pub fn is_meta_field(&self, name: &str) -> bool {
        self.meta_fields.iter().any(|f| f == name)
    }

    /// Document path segments for a column.
    ///
    /// The column name stays one segment so names containing `/` resolve.
    pub fn document_segments<'a>(&'a self, column: &'a str) -> Vec<&'a str> {
        if self.is_meta_field(column) {
            vec![column]
        } else {
            vec![self.source_prefix.as_str(), column]
        }
    }

    /// Aggregation name of the GROUP BY expression at `index`
    pub fn group_by_key(&self, index: usize) -> String {
        format!("{}{}", self.group_by_prefix, index)
    }
}
