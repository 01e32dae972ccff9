//! Result reader: one per executed query.
//!
//! Lifecycle: created with a request and the backend response, projected on
//! first `projection()` (memoized), finalized once by `finalize()`. Rows are
//! then read through either contract:
//!
//! - `fill_next(buffer)`: copy into a caller buffer; never finalizes
//! - `create_iterator()`: pull `ValsMessage`s; finalizes on first pull and
//!   stops as soon as the cancellation signal fires
//!
//! Both contracts share one cursor.

use std::sync::Arc;

use crate::observability::{Diagnostics, Event, LogDiagnostics, MetricsRegistry, Severity};
use crate::projection::{ColumnProjector, Projection};
use crate::request::SqlRequest;
use crate::schema::{Schema, Table};

use super::cancel::CancelSignal;
use super::config::ReaderConfig;
use super::errors::{ResultResult, ResultWarning};
use super::finalizer::{ResponseFinalizer, ResponseShape};
use super::response::RawResponse;
use super::store::{copy_row, Fetch, RowStore};
use super::value::{CellValue, ValsMessage};

/// Materialized result of one query
pub struct ResultReader {
    request: SqlRequest,
    response: RawResponse,
    config: ReaderConfig,
    diagnostics: Option<Arc<dyn Diagnostics>>,
    metrics: Option<Arc<MetricsRegistry>>,
    exit: Option<CancelSignal>,
    projection: Option<Projection>,
    rows: RowStore,
    warnings: Vec<ResultWarning>,
    shape: Option<ResponseShape>,
    finalized: bool,
    cursor: usize,
    cancel_seen: bool,
    exhausted: bool,
}

impl ResultReader {
    /// Creates a reader with an empty response
    pub fn new(request: SqlRequest) -> Self {
        Self {
            request,
            response: RawResponse::default(),
            config: ReaderConfig::default(),
            diagnostics: None,
            metrics: None,
            exit: None,
            projection: None,
            rows: RowStore::new(),
            warnings: Vec::new(),
            shape: None,
            finalized: false,
            cursor: 0,
            cancel_seen: false,
            exhausted: false,
        }
    }

    /// Sets the backend response
    pub fn with_response(mut self, response: RawResponse) -> Self {
        self.response = response;
        self
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Routes diagnostics to `diagnostics` instead of the default log sink
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Stops the pull-stream iterator once `signal` fires
    pub fn with_cancel(mut self, signal: CancelSignal) -> Self {
        self.exit = Some(signal);
        self
    }

    fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        match &self.diagnostics {
            Some(diagnostics) => diagnostics.emit(event, fields),
            None => {
                let level = self.config.severity().unwrap_or(Severity::Warn);
                LogDiagnostics::new(level).emit(event, fields);
            }
        }
    }

    fn metrics(&self) -> Option<&MetricsRegistry> {
        self.metrics.as_deref()
    }

    fn build_projection(&mut self) {
        if self.projection.is_some() {
            return;
        }

        let outcome = ColumnProjector::project(&self.request, self.response.has_aggregations());
        for warning in &outcome.warnings {
            if let ResultWarning::UnresolvedColumn { expression } = warning {
                self.emit(
                    Event::ColumnUnresolved,
                    &[("expression", expression.as_str()), ("table", self.request.table.name())],
                );
                if let Some(m) = self.metrics() {
                    m.increment_columns_unresolved();
                }
            }
        }

        let columns = outcome.projection.len().to_string();
        self.emit(
            Event::ProjectionBuilt,
            &[("columns", columns.as_str()), ("table", self.request.table.name())],
        );
        if let Some(m) = self.metrics() {
            m.increment_projections();
        }

        self.warnings.extend(outcome.warnings);
        self.projection = Some(outcome.projection);
    }

    /// Output columns; built on first call
    pub fn projection(&mut self) -> &Projection {
        self.build_projection();
        self.projection.get_or_insert_with(Projection::new)
    }

    /// Materializes all rows.
    ///
    /// Runs once; later calls after success are no-ops. An aggregate
    /// conflict fails every call and leaves the row store empty.
    pub fn finalize(&mut self) -> ResultResult<()> {
        if self.finalized {
            return Ok(());
        }
        self.build_projection();
        self.emit(Event::FinalizeBegin, &[("table", self.request.table.name())]);

        let projection = self.projection.get_or_insert_with(Projection::new);
        let result =
            ResponseFinalizer::new(&self.request, projection, &self.config).finalize(&self.response);

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.emit(
                    Event::FinalizeFailed,
                    &[("code", e.code().code()), ("reason", e.message())],
                );
                if let Some(m) = self.metrics() {
                    m.increment_finalize_failures();
                }
                return Err(e);
            }
        };

        for warning in &outcome.warnings {
            if let ResultWarning::UnsupportedType {
                column,
                column_type,
            } = warning
            {
                self.emit(
                    Event::UnsupportedColumnType,
                    &[("column", column.as_str()), ("type", column_type.type_name())],
                );
            }
        }
        for name in &outcome.missing_buckets {
            self.emit(Event::BucketsMissing, &[("aggregation", name.as_str())]);
        }
        if outcome.skipped_documents > 0 {
            let skipped = outcome.skipped_documents.to_string();
            self.emit(Event::DocumentSkipped, &[("count", skipped.as_str())]);
        }

        let rows = outcome.rows.len().to_string();
        self.emit(
            Event::FinalizeComplete,
            &[("rows", rows.as_str()), ("shape", outcome.shape.as_str())],
        );
        if let Some(m) = self.metrics() {
            m.increment_finalized();
            m.add_rows_materialized(outcome.rows.len() as u64);
            m.add_documents_skipped(outcome.skipped_documents as u64);
            m.add_values_unsupported(outcome.unsupported_values as u64);
        }

        self.warnings.extend(outcome.warnings);
        self.rows = outcome.rows;
        self.shape = Some(outcome.shape);
        self.finalized = true;
        Ok(())
    }

    /// Schema of the originating request
    pub fn schema(&self) -> &Arc<Schema> {
        &self.request.schema
    }

    /// Table of the originating request
    pub fn table(&self) -> &Arc<Table> {
        &self.request.table
    }

    pub fn request(&self) -> &SqlRequest {
        &self.request
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Materialized rows; empty until finalized
    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    /// Branch that produced the rows, once finalized
    pub fn shape(&self) -> Option<ResponseShape> {
        self.shape
    }

    /// Recovered anomalies from projection and finalization
    pub fn warnings(&self) -> &[ResultWarning] {
        &self.warnings
    }

    /// Total hit count reported by the backend
    pub fn total(&self) -> u64 {
        self.response.total
    }

    /// Backend scroll cursor, if any
    pub fn scroll_id(&self) -> Option<&str> {
        self.response.scroll_id.as_deref()
    }

    /// Rows consumed through either contract
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Copies the next row into `buffer`.
    ///
    /// The result must already be finalized; an unfinalized reader reads as
    /// empty.
    pub fn fill_next(&mut self, buffer: &mut [CellValue]) -> ResultResult<Fetch> {
        let Some(row) = self.rows.get(self.cursor) else {
            return Ok(Fetch::EndOfData);
        };
        copy_row(row, buffer)?;
        self.cursor += 1;
        Ok(Fetch::Row)
    }

    /// Pull-stream view sharing this reader's cursor
    pub fn create_iterator(&mut self) -> ResultReaderNext<'_> {
        ResultReaderNext { reader: self }
    }

    /// Releases the result
    pub fn close(self) {
        let pulled = self.cursor.to_string();
        self.emit(Event::ResultClosed, &[("rows_read", pulled.as_str())]);
    }

    fn is_cancelled(&mut self) -> bool {
        let fired = self.exit.as_ref().map_or(false, CancelSignal::is_cancelled);
        if fired {
            if !self.cancel_seen {
                self.cancel_seen = true;
                let cursor = self.cursor.to_string();
                self.emit(Event::ResultCancelled, &[("cursor", cursor.as_str())]);
            }
            if let Some(m) = self.metrics() {
                m.increment_pulls_cancelled();
            }
        }
        fired
    }
}

/// Pull-stream contract over a `ResultReader`
pub struct ResultReaderNext<'a> {
    reader: &'a mut ResultReader,
}

impl<'a> Iterator for ResultReaderNext<'a> {
    type Item = ValsMessage;

    fn next(&mut self) -> Option<ValsMessage> {
        let reader = &mut *self.reader;
        if reader.is_cancelled() {
            return None;
        }
        if !reader.finalized && reader.finalize().is_err() {
            return None;
        }

        let Some(row) = reader.rows.get(reader.cursor) else {
            if !reader.exhausted {
                reader.exhausted = true;
                let rows = reader.rows.len().to_string();
                reader.emit(Event::ResultExhausted, &[("rows", rows.as_str())]);
            }
            return None;
        };
        let values = row.clone();
        reader.cursor += 1;
        if let Some(m) = reader.metrics() {
            m.increment_rows_pulled();
        }
        Some(ValsMessage::new(values, reader.cursor as u64))
    }
}
