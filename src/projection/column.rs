//! Output column descriptors

use crate::request::SelectColumn;
use crate::schema::ColumnType;

/// One output column of a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name; also the document field read for per-document rows
    pub name: String,
    /// Zero-based position, fixed for the life of the result
    pub ordinal: usize,
    /// Declared type
    pub column_type: ColumnType,
    /// Selected expression the column came from, if any
    pub source: Option<SelectColumn>,
}

/// Ordered output columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    columns: Vec<ColumnDescriptor>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column; its ordinal is the current column count
    pub fn push(
        &mut self,
        name: impl Into<String>,
        column_type: ColumnType,
        source: Option<SelectColumn>,
    ) {
        let ordinal = self.columns.len();
        self.columns.push(ColumnDescriptor {
            name: name.into(),
            ordinal,
            column_type,
            source,
        });
    }

    /// Columns in ordinal order
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Column at ordinal
    pub fn column(&self, ordinal: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(ordinal)
    }

    /// Column names in ordinal order
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }
}
