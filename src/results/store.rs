//! Materialized rows
//!
//! Rows are appended only while a result is being finalized. After that the
//! store is read-only and any number of `RowCursor`s may walk it.

use super::errors::{ResultError, ResultResult};
use super::value::{CellValue, Row, ValsMessage};

/// Outcome of a buffer-fill read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// A row was copied into the buffer
    Row,
    /// No rows remain
    EndOfData,
}

/// Ordered, in-memory rows of one result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows were materialized
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at position
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Rows in order
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// An independent read-only cursor starting at the first row
    pub fn cursor(&self) -> RowCursor<'_> {
        RowCursor {
            store: self,
            position: 0,
        }
    }
}

/// Copies `row` into the front of `buffer`
pub(crate) fn copy_row(row: &[CellValue], buffer: &mut [CellValue]) -> ResultResult<()> {
    if buffer.len() < row.len() {
        return Err(ResultError::buffer_too_small(row.len(), buffer.len()));
    }
    buffer[..row.len()].clone_from_slice(row);
    Ok(())
}

/// Read-only cursor over a finalized `RowStore`
#[derive(Debug, Clone)]
pub struct RowCursor<'a> {
    store: &'a RowStore,
    position: usize,
}

impl<'a> RowCursor<'a> {
    /// Rows consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Copies the next row into `buffer`
    pub fn fill_next(&mut self, buffer: &mut [CellValue]) -> ResultResult<Fetch> {
        let Some(row) = self.store.get(self.position) else {
            return Ok(Fetch::EndOfData);
        };
        copy_row(row, buffer)?;
        self.position += 1;
        Ok(Fetch::Row)
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = ValsMessage;

    fn next(&mut self) -> Option<ValsMessage> {
        let row = self.store.get(self.position)?;
        self.position += 1;
        Some(ValsMessage::new(row.clone(), self.position as u64))
    }
}
