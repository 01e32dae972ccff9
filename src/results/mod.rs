//! Result materialization for aerofed
//!
//! Per query:
//! - `ResultReader` owns the request, the raw backend response and the
//!   materialized rows
//! - `ResponseFinalizer` maps hits or aggregation trees onto the projection
//! - `RowStore` holds rows; `fill_next` and `create_iterator` read them
//!
//! Failures are explicit:
//! - mixed single-value and bucketed aggregates abort finalization
//! - per-value anomalies leave the cell null and surface as warnings

mod cancel;
mod config;
mod errors;
mod finalizer;
mod reader;
mod response;
mod store;
mod value;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use config::{ConfigError, ReaderConfig};
pub use errors::{
    ResultError, ResultErrorCode, ResultResult, ResultWarning, Severity as ResultSeverity,
};
pub use finalizer::{FinalizeOutcome, ResponseFinalizer, ResponseShape};
pub use reader::{ResultReader, ResultReaderNext};
pub use response::RawResponse;
pub use store::{Fetch, RowCursor, RowStore};
pub use value::{CellValue, Row, ValsMessage};
