//! One-shot cancellation signal polled by the pull-stream iterator.
//!
//! The signal fires when the handle calls `cancel()` or when the handle is
//! dropped, the same way a closed channel wakes every receiver.

use tokio::sync::watch;

/// Caller side: fires the signal
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Fires the signal; later calls are no-ops
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Reader side: non-blocking check
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// True once the handle cancelled or went away
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }
}

/// Creates a connected handle and signal
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}
