use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::batch::orchestrator::BatchObserver;

/// Tracks settled rows and emits monotone progress percentages.
///
/// Completions may arrive from any worker thread; the settled count is an
/// atomic and emission is serialized through the `last` guard so observers
/// never see the percentage go backwards.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    total: usize,
    settled: AtomicUsize,
    last: Mutex<u8>,
}

impl ProgressTracker {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            settled: AtomicUsize::new(0),
            last: Mutex::new(0),
        }
    }

    /// Record one settled row (skip, success, or failure) and emit progress.
    pub(crate) fn settle(&self, observer: &dyn BatchObserver) {
        let settled = self.settled.fetch_add(1, Ordering::SeqCst) + 1;
        let pct = percentage(settled, self.total);
        self.emit(pct, observer);
    }

    /// Emit 100 for batches where no row ever settles (zero input rows).
    pub(crate) fn complete(&self, observer: &dyn BatchObserver) {
        self.emit(100, observer);
    }

    fn emit(&self, pct: u8, observer: &dyn BatchObserver) {
        let mut last = self.last.lock().expect("progress lock poisoned");
        if pct > *last {
            *last = pct;
            observer.progress(pct);
        }
    }
}

fn percentage(settled: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((settled as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/batch/progress.rs"]
mod tests;
