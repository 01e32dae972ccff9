//! Observability for aerofed
//!
//! - Structured one-line JSON logs
//! - Typed lifecycle events
//! - Atomic counters
//! - Injectable diagnostics sinks
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use aerofed::observability::{LogDiagnostics, MetricsRegistry, Severity};
//!
//! let diagnostics = Arc::new(LogDiagnostics::new(Severity::Info));
//! let metrics = Arc::new(MetricsRegistry::new());
//! let reader = ResultReader::new(request)
//!     .with_diagnostics(diagnostics)
//!     .with_metrics(metrics.clone());
//! ```

mod diagnostics;
mod events;
mod logger;
mod metrics;

pub use diagnostics::{
    DiagnosticRecord, Diagnostics, LogDiagnostics, MemoryDiagnostics, WriterDiagnostics,
};
pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
