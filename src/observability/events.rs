//! Observable events of result materialization
//!
//! Events are explicit and typed; the logged name is the upper-case form.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    // Projection
    /// Projection built for a result
    ProjectionBuilt,
    /// A selected expression matched no table field
    ColumnUnresolved,

    // Finalization
    /// Finalization started
    FinalizeBegin,
    /// Finalization produced rows
    FinalizeComplete,
    /// Finalization aborted
    FinalizeFailed,
    /// A column type has no coercion rule
    UnsupportedColumnType,
    /// An empty hit was skipped
    DocumentSkipped,
    /// A bucketed aggregation had no bucket list
    BucketsMissing,

    // Iteration
    /// Pull stopped by the cancellation signal
    ResultCancelled,
    /// All rows consumed
    ResultExhausted,
    /// Consumer released the result
    ResultClosed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ProjectionBuilt => "PROJECTION_BUILT",
            Event::ColumnUnresolved => "COLUMN_UNRESOLVED",
            Event::FinalizeBegin => "FINALIZE_BEGIN",
            Event::FinalizeComplete => "FINALIZE_COMPLETE",
            Event::FinalizeFailed => "FINALIZE_FAILED",
            Event::UnsupportedColumnType => "UNSUPPORTED_COLUMN_TYPE",
            Event::DocumentSkipped => "DOCUMENT_SKIPPED",
            Event::BucketsMissing => "BUCKETS_MISSING",
            Event::ResultCancelled => "RESULT_CANCELLED",
            Event::ResultExhausted => "RESULT_EXHAUSTED",
            Event::ResultClosed => "RESULT_CLOSED",
        }
    }

    /// Severity the event is reported at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ColumnUnresolved | Event::UnsupportedColumnType => Severity::Warn,
            Event::FinalizeFailed => Severity::Error,
            Event::DocumentSkipped | Event::BucketsMissing | Event::ResultExhausted => {
                Severity::Trace
            }
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_upper_snake() {
        let events = [
            Event::ProjectionBuilt,
            Event::ColumnUnresolved,
            Event::FinalizeBegin,
            Event::FinalizeComplete,
            Event::FinalizeFailed,
            Event::UnsupportedColumnType,
            Event::DocumentSkipped,
            Event::BucketsMissing,
            Event::ResultCancelled,
            Event::ResultExhausted,
            Event::ResultClosed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::FinalizeFailed.severity(), Severity::Error);
        assert_eq!(Event::ColumnUnresolved.severity(), Severity::Warn);
        assert_eq!(Event::FinalizeComplete.severity(), Severity::Info);
        assert_eq!(Event::DocumentSkipped.severity(), Severity::Trace);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::ResultCancelled), "RESULT_CANCELLED");
    }
}
