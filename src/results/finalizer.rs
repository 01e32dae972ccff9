//! Response finalization
//!
//! Maps hits or aggregation trees onto the projection, producing rows in
//! backend order. Shape precedence mirrors the projector:
//!
//! 1. `COUNT(*)`: one row holding the total hit count
//! 2. Aggregations present (and not `SELECT *`):
//!    - single-value: one row, one value per selected expression
//!    - bucketed: one `[name, key, doc_count]` row per bucket
//! 3. Otherwise, including `SELECT *`: one row per non-empty hit
//!
//! Per-value anomalies leave the cell null; only mixing the two
//! aggregate shapes aborts.

use crate::document::DocumentTree;
use crate::projection::{ColumnDescriptor, Projection};
use crate::request::SqlRequest;
use crate::schema::ColumnType;

use super::config::ReaderConfig;
use super::errors::{ResultError, ResultResult, ResultWarning};
use super::response::RawResponse;
use super::store::RowStore;
use super::value::{CellValue, Row};

/// Which branch produced the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    CountStar,
    SingleValue,
    MultiValue,
    /// Aggregations returned but neither aggregate shape flagged
    UnflaggedAggregations,
    Documents,
}

impl ResponseShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseShape::CountStar => "count_star",
            ResponseShape::SingleValue => "single_value",
            ResponseShape::MultiValue => "multi_value",
            ResponseShape::UnflaggedAggregations => "unflagged_aggregations",
            ResponseShape::Documents => "documents",
        }
    }
}

/// Rows plus what was recovered along the way
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizeOutcome {
    pub shape: ResponseShape,
    pub rows: RowStore,
    /// One entry per offending column
    pub warnings: Vec<ResultWarning>,
    /// Cells left null because their column type has no coercion rule
    pub unsupported_values: usize,
    /// Empty hits skipped
    pub skipped_documents: usize,
    /// Bucketed aggregations with no bucket list
    pub missing_buckets: Vec<String>,
}

impl FinalizeOutcome {
    fn new(shape: ResponseShape) -> Self {
        Self {
            shape,
            rows: RowStore::new(),
            warnings: Vec::new(),
            unsupported_values: 0,
            skipped_documents: 0,
            missing_buckets: Vec::new(),
        }
    }

    fn warn(&mut self, warning: ResultWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }
}

/// Materializes one backend response against a projection
pub struct ResponseFinalizer<'a> {
    request: &'a SqlRequest,
    projection: &'a Projection,
    config: &'a ReaderConfig,
}

impl<'a> ResponseFinalizer<'a> {
    pub fn new(request: &'a SqlRequest, projection: &'a Projection, config: &'a ReaderConfig) -> Self {
        Self {
            request,
            projection,
            config,
        }
    }

    /// Produces the rows for `response`
    pub fn finalize(&self, response: &RawResponse) -> ResultResult<FinalizeOutcome> {
        if self.request.has_aggregate_conflict() {
            return Err(ResultError::aggregate_conflict());
        }

        let star = self.request.is_full_projection();

        if !star && self.request.is_count_star() {
            let mut outcome = FinalizeOutcome::new(ResponseShape::CountStar);
            outcome.rows.push(vec![total_cell(response.total)]);
            return Ok(outcome);
        }

        if !star && response.has_aggregations() {
            if self.request.has_single_value {
                return Ok(self.single_value(response));
            }
            if self.request.has_multi_value {
                return Ok(self.multi_value(&response.aggregations));
            }
            return Ok(FinalizeOutcome::new(ResponseShape::UnflaggedAggregations));
        }

        Ok(self.documents(&response.documents))
    }

    fn single_value(&self, response: &RawResponse) -> FinalizeOutcome {
        let mut outcome = FinalizeOutcome::new(ResponseShape::SingleValue);
        let row: Row = self
            .request
            .select
            .columns
            .iter()
            .map(|col| {
                if col.count_star {
                    total_cell(response.total)
                } else {
                    let path = format!("{}/value", col.key());
                    response
                        .aggregations
                        .get_raw(&path)
                        .map(CellValue::from_json)
                        .unwrap_or(CellValue::Null)
                }
            })
            .collect();
        outcome.rows.push(row);
        outcome
    }

    fn multi_value(&self, aggregations: &DocumentTree) -> FinalizeOutcome {
        let mut outcome = FinalizeOutcome::new(ResponseShape::MultiValue);
        let select = &self.request.select;

        let names: Vec<String> = if select.group_by.is_empty() {
            select.columns.iter().map(|c| c.key().to_string()).collect()
        } else {
            (0..select.group_by.len())
                .map(|i| self.config.group_by_key(i))
                .collect()
        };

        for name in names {
            let path = format!("{}/buckets", name);
            if aggregations.get_raw(&path).is_none() {
                outcome.missing_buckets.push(name);
                continue;
            }
            for bucket in aggregations.helpers(&path) {
                outcome.rows.push(vec![
                    CellValue::Text(name.clone()),
                    bucket
                        .get_string("key")
                        .map_or(CellValue::Null, CellValue::Text),
                    bucket
                        .get_i64("doc_count")
                        .map_or(CellValue::Null, CellValue::Integer),
                ]);
            }
        }
        outcome
    }

    fn documents(&self, documents: &[DocumentTree]) -> FinalizeOutcome {
        let mut outcome = FinalizeOutcome::new(ResponseShape::Documents);

        for doc in documents {
            if doc.is_empty() {
                outcome.skipped_documents += 1;
                continue;
            }
            let row: Row = self
                .projection
                .iter()
                .map(|col| self.document_value(doc, col, &mut outcome))
                .collect();
            outcome.rows.push(row);
        }
        outcome
    }

    fn document_value(
        &self,
        doc: &DocumentTree,
        col: &ColumnDescriptor,
        outcome: &mut FinalizeOutcome,
    ) -> CellValue {
        let path = self.config.document_segments(&col.name);
        match col.column_type {
            ColumnType::String | ColumnType::Time => {
                doc.string_in(&path).map_or(CellValue::Null, CellValue::Text)
            }
            ColumnType::Integer => doc.i64_in(&path).map_or(CellValue::Null, CellValue::Integer),
            ColumnType::Number => doc.f64_in(&path).map_or(CellValue::Null, CellValue::Number),
            ColumnType::Binary => match doc.get_in(&path) {
                Some(raw) if !raw.is_null() => serde_json::to_vec(raw)
                    .map(CellValue::Blob)
                    .unwrap_or(CellValue::Null),
                _ => CellValue::Null,
            },
            ColumnType::Bool | ColumnType::Map => {
                outcome.unsupported_values += 1;
                outcome.warn(ResultWarning::UnsupportedType {
                    column: col.name.clone(),
                    column_type: col.column_type,
                });
                CellValue::Null
            }
        }
    }
}

fn total_cell(total: u64) -> CellValue {
    CellValue::Integer(i64::try_from(total).unwrap_or(i64::MAX))
}
