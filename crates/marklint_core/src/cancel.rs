//! Cooperative cancellation for analysis runs.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::debug;

/// A cloneable cancellation flag shared between a caller and a running analysis.
///
/// Checks observe it between produced violations; once set it never resets.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Tracks the in-flight analysis per document.
///
/// Starting a new run for a key cancels the previous one, so results of a
/// superseded run are never delivered after a newer request.
#[derive(Debug, Default)]
pub struct AnalysisScheduler {
    in_flight: Mutex<HashMap<String, CancellationToken>>,
}

impl AnalysisScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new run for `key` and returns its token.
    pub fn begin(&self, key: impl Into<String>) -> CancellationToken {
        let key = key.into();
        let token = CancellationToken::new();
        if let Some(previous) = self.in_flight.lock().insert(key.clone(), token.clone()) {
            debug!("Superseding in-flight analysis for {}", key);
            previous.cancel();
        }
        token
    }

    /// Retires a run. A token that has already been superseded is ignored.
    pub fn finish(&self, key: &str, token: &CancellationToken) {
        let mut in_flight = self.in_flight.lock();
        if in_flight.get(key).is_some_and(|current| current.same_as(token)) {
            in_flight.remove(key);
        }
    }

    /// Cancels and forgets every in-flight run.
    pub fn cancel_all(&self) {
        for (_, token) in self.in_flight.lock().drain() {
            token.cancel();
        }
    }

    /// Number of runs currently registered.
    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }
}
