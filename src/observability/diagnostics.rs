//! Diagnostics sinks injected into result readers.
//!
//! Readers never call the logger directly; they report through a
//! `Diagnostics` handle so callers decide where events go.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use super::events::Event;
use super::logger::{Logger, Severity};

/// Receiver of structured diagnostic events
pub trait Diagnostics: Send + Sync {
    /// Report an event with key/value fields
    fn emit(&self, event: Event, fields: &[(&str, &str)]);
}

/// Writes events through `Logger`, dropping those below `min_severity`
#[derive(Debug, Clone, Copy)]
pub struct LogDiagnostics {
    min_severity: Severity,
}

impl LogDiagnostics {
    pub fn new(min_severity: Severity) -> Self {
        Self { min_severity }
    }

    /// Minimum severity written
    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    fn enabled(&self, event: Event) -> bool {
        event.severity() >= self.min_severity
    }
}

impl Default for LogDiagnostics {
    fn default() -> Self {
        Self::new(Severity::Warn)
    }
}

impl Diagnostics for LogDiagnostics {
    fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        if self.enabled(event) {
            Logger::log(event.severity(), event.as_str(), fields);
        }
    }
}

/// Writes events to any shared writer, e.g. a log file
pub struct WriterDiagnostics<W: Write + Send> {
    min_severity: Severity,
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterDiagnostics<W> {
    pub fn new(writer: W, min_severity: Severity) -> Self {
        Self {
            min_severity,
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> Diagnostics for WriterDiagnostics<W> {
    fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        if event.severity() < self.min_severity {
            return;
        }
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Logger::log_to_writer(event.severity(), event.as_str(), fields, &mut *writer);
    }
}

/// One recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub event: Event,
    pub severity: Severity,
    pub fields: Vec<(String, String)>,
}

impl DiagnosticRecord {
    /// Value of a field, if present
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Records every event in memory, regardless of severity
#[derive(Debug, Clone, Default)]
pub struct MemoryDiagnostics {
    records: Arc<Mutex<Vec<DiagnosticRecord>>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DiagnosticRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All recorded entries, oldest first
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.lock().clone()
    }

    /// Number of records for `event`
    pub fn count(&self, event: Event) -> usize {
        self.lock().iter().filter(|r| r.event == event).count()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        self.lock().push(DiagnosticRecord {
            event,
            severity: event.severity(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_records_in_order() {
        let diagnostics = MemoryDiagnostics::new();
        diagnostics.emit(Event::FinalizeBegin, &[]);
        diagnostics.emit(Event::ColumnUnresolved, &[("expression", "nope")]);

        let records = diagnostics.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event, Event::FinalizeBegin);
        assert_eq!(records[1].severity, Severity::Warn);
        assert_eq!(records[1].field("expression"), Some("nope"));
        assert_eq!(diagnostics.count(Event::ColumnUnresolved), 1);
    }

    #[test]
    fn test_memory_clones_share_records() {
        let diagnostics = MemoryDiagnostics::new();
        let handle = diagnostics.clone();
        handle.emit(Event::ResultClosed, &[]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_writer_filters_by_severity() {
        let sink = WriterDiagnostics::new(Vec::new(), Severity::Warn);
        sink.emit(Event::FinalizeBegin, &[]);
        sink.emit(Event::UnsupportedColumnType, &[("column", "flag")]);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("UNSUPPORTED_COLUMN_TYPE"));
    }

    #[test]
    fn test_log_threshold() {
        let diagnostics = LogDiagnostics::default();
        assert_eq!(diagnostics.min_severity(), Severity::Warn);
        assert!(!diagnostics.enabled(Event::ProjectionBuilt));
        assert!(diagnostics.enabled(Event::FinalizeFailed));
    }
}
