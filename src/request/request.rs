//! Translated request: the SELECT, the resolved table and the aggregate shape.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{Schema, Table};

use super::ast::SelectStatement;

/// Errors raised while resolving a request description
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// The named table is not part of the schema
    #[error("Table '{table}' not found in schema '{schema}'")]
    UnknownTable { schema: String, table: String },
}

/// A translated request as consumed by result materialization
#[derive(Debug, Clone)]
pub struct SqlRequest {
    /// Parsed SELECT
    pub select: SelectStatement,
    /// Schema of the originating data source
    pub schema: Arc<Schema>,
    /// Table the SELECT resolved against
    pub table: Arc<Table>,
    /// The backend query carries single-value aggregations (avg, sum, ...)
    pub has_single_value: bool,
    /// The backend query carries bucketed aggregations (terms, ...)
    pub has_multi_value: bool,
}

impl SqlRequest {
    /// Creates a request without aggregations
    pub fn new(select: SelectStatement, schema: Arc<Schema>, table: Arc<Table>) -> Self {
        Self {
            select,
            schema,
            table,
            has_single_value: false,
            has_multi_value: false,
        }
    }

    /// Marks the request as carrying single-value aggregations
    pub fn with_single_value(mut self) -> Self {
        self.has_single_value = true;
        self
    }

    /// Marks the request as carrying bucketed aggregations
    pub fn with_multi_value(mut self) -> Self {
        self.has_multi_value = true;
        self
    }

    /// `SELECT *`
    pub fn is_full_projection(&self) -> bool {
        self.select.star
    }

    /// `SELECT COUNT(*)`
    pub fn is_count_star(&self) -> bool {
        self.select.is_count_star()
    }

    /// Both aggregate shapes flagged at once
    pub fn has_aggregate_conflict(&self) -> bool {
        self.has_single_value && self.has_multi_value
    }
}

/// Serializable request description, resolved against a schema at load time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Table name
    pub table: String,
    /// Parsed SELECT
    pub select: SelectStatement,
    #[serde(default)]
    pub single_value: bool,
    #[serde(default)]
    pub multi_value: bool,
}

impl RequestSpec {
    /// Resolves the table name and builds the request
    pub fn resolve(self, schema: Arc<Schema>) -> Result<SqlRequest, RequestError> {
        let table = schema
            .table(&self.table)
            .ok_or_else(|| RequestError::UnknownTable {
                schema: schema.name.clone(),
                table: self.table.clone(),
            })?;

        Ok(SqlRequest {
            select: self.select,
            schema,
            table,
            has_single_value: self.single_value,
            has_multi_value: self.multi_value,
        })
    }
}
