//! Observability hook for the cart store.

use std::sync::{Mutex, PoisonError};

use super::PersistenceError;

/// Receives the cart store's non-fatal events.
///
/// Persistence failures land here instead of in command results.
pub trait CartObserver: Send + Sync {
    /// A read, decode, encode, or write of the persisted cart failed.
    fn persistence_failed(&self, error: &PersistenceError);

    /// Hydration discarded `count` malformed or duplicate lines.
    fn lines_dropped(&self, count: usize) {
        let _ = count;
    }
}

/// Default observer: forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CartObserver for TracingObserver {
    fn persistence_failed(&self, error: &PersistenceError) {
        if error.is_read() {
            tracing::warn!(error = %error, "Discarding persisted cart");
        } else {
            tracing::error!(error = %error, "Cart change not persisted");
        }
    }

    fn lines_dropped(&self, count: usize) {
        tracing::warn!(count, "Dropped invalid lines from persisted cart");
    }
}

/// Observer that keeps every event, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    failures: Mutex<Vec<String>>,
    dropped: Mutex<usize>,
}

impl RecordingObserver {
    /// An observer with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered persistence failures, oldest first.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Total lines reported as dropped.
    #[must_use]
    pub fn dropped(&self) -> usize {
        *self.dropped.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartObserver for RecordingObserver {
    fn persistence_failed(&self, error: &PersistenceError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error.to_string());
    }

    fn lines_dropped(&self, count: usize) {
        *self.dropped.lock().unwrap_or_else(PoisonError::into_inner) += count;
    }
}
