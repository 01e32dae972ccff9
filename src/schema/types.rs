//! Table catalog types
//!
//! Declared column types:
//! - string: UTF-8 text
//! - time: timestamp carried as text
//! - integer: 64-bit signed integer
//! - number: 64-bit floating point
//! - binary: structured value re-encoded as JSON bytes
//! - bool, map: declared but without a coercion rule

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Declared type of a table field or result column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// UTF-8 text
    String,
    /// Date/time, kept as text
    Time,
    /// 64-bit signed integer
    #[serde(alias = "int")]
    Integer,
    /// 64-bit floating point
    #[serde(alias = "float")]
    Number,
    /// Opaque structured value
    #[serde(alias = "blob")]
    Binary,
    /// Boolean
    Bool,
    /// Nested object
    Map,
}

impl ColumnType {
    /// Returns the type name for log fields and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Time => "time",
            ColumnType::Integer => "integer",
            ColumnType::Number => "number",
            ColumnType::Binary => "binary",
            ColumnType::Bool => "bool",
            ColumnType::Map => "map",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A single field of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableField {
    /// Field name as stored in the document source
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: ColumnType,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TableField {
    pub fn new(name: impl Into<String>, field_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: None,
        }
    }
}

/// A table: ordered field list plus a name lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    fields: Vec<TableField>,
    field_map: HashMap<String, usize>,
}

impl Table {
    /// Create a table, indexing fields by name.
    ///
    /// On duplicate names the first declaration wins the lookup.
    pub fn new(name: impl Into<String>, fields: Vec<TableField>) -> Self {
        let mut field_map = HashMap::with_capacity(fields.len());
        for (pos, field) in fields.iter().enumerate() {
            field_map.entry(field.name.clone()).or_insert(pos);
        }
        Self {
            name: name.into(),
            fields,
            field_map,
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[TableField] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&TableField> {
        self.field_map.get(name).map(|&pos| &self.fields[pos])
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the table declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The data source schema a request was issued against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Schema name
    pub name: String,
    /// Backend kind, e.g. "elasticsearch"
    pub source_type: String,
    tables: Vec<Arc<Table>>,
}

impl Schema {
    /// Create a schema from its tables
    pub fn new(
        name: impl Into<String>,
        source_type: impl Into<String>,
        tables: Vec<Table>,
    ) -> Self {
        Self {
            name: name.into(),
            source_type: source_type.into(),
            tables: tables.into_iter().map(Arc::new).collect(),
        }
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<Arc<Table>> {
        self.tables.iter().find(|t| t.name() == name).cloned()
    }

    /// Table names in declaration order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name()).collect()
    }
}
