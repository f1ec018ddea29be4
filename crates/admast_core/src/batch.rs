//! Partial-failure accounting for chunked bulk operations.
//!
//! Some provider endpoints cap how much one call may carry (audience
//! membership uploads, batch creative creation). Those operations split
//! their payload, submit chunks sequentially, and report per-chunk outcomes
//! instead of failing the whole operation on one chunk's error.

use serde_json::Value;

/// Aggregate outcome of a chunked operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Sub-operations that completed.
    pub succeeded: usize,
    /// Sub-operations that failed.
    pub failed: usize,
    /// Messages from the failing sub-operations, in submission order.
    pub errors: Vec<String>,
}

impl BatchOutcome {
    /// Start an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed sub-operation.
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// Record one failed sub-operation and keep its error message.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.failed += 1;
        self.errors.push(error.into());
    }

    /// Whether every sub-operation completed.
    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }

    /// Total sub-operations attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Split `items` into provider-sized chunks, preserving order.
///
/// A `chunk_size` of zero is treated as one to keep the operation finite.
pub fn split_batches(items: Vec<Value>, chunk_size: usize) -> Vec<Vec<Value>> {
    let size = chunk_size.max(1);
    let mut batches = Vec::with_capacity(items.len().div_ceil(size).max(1));
    let mut current = Vec::with_capacity(size.min(items.len()));
    for item in items {
        current.push(item);
        if current.len() == size {
            batches.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}
