//! Result materialization counters
//!
//! - Counters only, monotonic
//! - Thread-safe, shared between readers through `Arc`

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for projection, finalization and iteration
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    projections_built: AtomicU64,
    results_finalized: AtomicU64,
    finalize_failures: AtomicU64,
    rows_materialized: AtomicU64,
    columns_unresolved: AtomicU64,
    values_unsupported: AtomicU64,
    documents_skipped: AtomicU64,
    rows_pulled: AtomicU64,
    pulls_cancelled: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_projections(&self) {
        self.projections_built.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_finalized(&self) {
        self.results_finalized.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_finalize_failures(&self) {
        self.finalize_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_rows_materialized(&self, rows: u64) {
        self.rows_materialized.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn increment_columns_unresolved(&self) {
        self.columns_unresolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_values_unsupported(&self, values: u64) {
        self.values_unsupported.fetch_add(values, Ordering::Relaxed);
    }

    pub fn add_documents_skipped(&self, docs: u64) {
        self.documents_skipped.fetch_add(docs, Ordering::Relaxed);
    }

    pub fn increment_rows_pulled(&self) {
        self.rows_pulled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pulls_cancelled(&self) {
        self.pulls_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            projections_built: self.projections_built.load(Ordering::Relaxed),
            results_finalized: self.results_finalized.load(Ordering::Relaxed),
            finalize_failures: self.finalize_failures.load(Ordering::Relaxed),
            rows_materialized: self.rows_materialized.load(Ordering::Relaxed),
            columns_unresolved: self.columns_unresolved.load(Ordering::Relaxed),
            values_unsupported: self.values_unsupported.load(Ordering::Relaxed),
            documents_skipped: self.documents_skipped.load(Ordering::Relaxed),
            rows_pulled: self.rows_pulled.load(Ordering::Relaxed),
            pulls_cancelled: self.pulls_cancelled.load(Ordering::Relaxed),
        }
    }

    /// Snapshot as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub projections_built: u64,
    pub results_finalized: u64,
    pub finalize_failures: u64,
    pub rows_materialized: u64,
    pub columns_unresolved: u64,
    pub values_unsupported: u64,
    pub documents_skipped: u64,
    pub rows_pulled: u64,
    pub pulls_cancelled: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_zero() {
        assert_eq!(MetricsRegistry::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters() {
        let registry = MetricsRegistry::new();
        registry.increment_projections();
        registry.increment_finalized();
        registry.add_rows_materialized(5);
        registry.add_rows_materialized(2);
        registry.increment_rows_pulled();
        registry.increment_pulls_cancelled();
        registry.add_values_unsupported(3);
        registry.add_values_unsupported(0);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.projections_built, 1);
        assert_eq!(snapshot.results_finalized, 1);
        assert_eq!(snapshot.rows_materialized, 7);
        assert_eq!(snapshot.rows_pulled, 1);
        assert_eq!(snapshot.pulls_cancelled, 1);
        assert_eq!(snapshot.finalize_failures, 0);
        assert_eq!(snapshot.values_unsupported, 3);
    }

    #[test]
    fn test_to_json() {
        let registry = MetricsRegistry::new();
        registry.increment_columns_unresolved();

        let parsed: serde_json::Value = serde_json::from_str(&registry.to_json()).unwrap();
        assert_eq!(parsed["columns_unresolved"], 1);
        assert_eq!(parsed["rows_pulled"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        reg.increment_rows_pulled();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.snapshot().rows_pulled, 800);
    }
}
