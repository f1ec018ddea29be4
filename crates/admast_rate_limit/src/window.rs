//! Usage window bookkeeping.

use std::time::{Duration, Instant};

/// Weighted usage accumulated by one account within the current window.
///
/// The score only grows within a window and resets wholesale once the window
/// elapses, matching the provider's published model. A burst immediately
/// after a window boundary is accepted behavior, not a bug.
#[derive(Debug, Clone, Copy)]
pub struct UsageWindow {
    score: u32,
    window_start: Instant,
}

impl UsageWindow {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            score: 0,
            window_start: now,
        }
    }

    /// Current weighted score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Remaining time until the window resets.
    pub fn remaining(&self, window: Duration, now: Instant) -> Duration {
        window.saturating_sub(now.duration_since(self.window_start))
    }

    pub(crate) fn expired(&self, window: Duration, now: Instant) -> bool {
        now.duration_since(self.window_start) > window
    }

    pub(crate) fn reset(&mut self, now: Instant) {
        self.score = 0;
        self.window_start = now;
    }

    pub(crate) fn add(&mut self, weight: u32) {
        self.score += weight;
    }
}
