//! Weighted admission gate.

use crate::{AccessTier, RateLimitError, RateLimitErrorKind, UsageWindow};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Classification of a single call attempt for budget accounting.
///
/// Computed per attempt from the HTTP verb and consumed only by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Non-mutating call, weight 1.
    Read,
    /// Mutating call, weight 3.
    Write,
}

impl CallKind {
    /// Weight this call contributes to the window score.
    pub fn weight(&self) -> u32 {
        match self {
            CallKind::Read => 1,
            CallKind::Write => 3,
        }
    }

    /// Whether this call mutates provider state.
    pub fn is_write(&self) -> bool {
        matches!(self, CallKind::Write)
    }
}

/// Admission gate tracking a weighted usage score per advertiser account.
///
/// Windows are created on the first call from an account and live until the
/// process restarts; they are a cache of recent spend, not a source of
/// truth. The map is guarded by a mutex held only for the duration of one
/// admission decision, so two concurrent calls cannot both claim the same
/// final budget slot.
///
/// # Example
///
/// ```
/// use admast_rate_limit::{AccessTier, CallKind, RateLimiter};
///
/// let limiter = RateLimiter::new(AccessTier::Development);
/// assert!(limiter.check("act_1", CallKind::Read).is_ok());
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    tier: AccessTier,
    windows: Mutex<HashMap<String, UsageWindow>>,
}

impl RateLimiter {
    /// Create a limiter for the configured tier.
    pub fn new(tier: AccessTier) -> Self {
        Self {
            tier,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// The tier this limiter enforces.
    pub fn tier(&self) -> AccessTier {
        self.tier
    }

    /// Admit or reject a call for `account_id`.
    ///
    /// On success the account's window score has already been raised by the
    /// call weight; the caller dispatches immediately afterwards. A rejected
    /// call leaves the score untouched, so a lighter call may still fit in
    /// the same window.
    #[instrument(skip(self))]
    pub fn check(&self, account_id: &str, kind: CallKind) -> Result<(), RateLimitError> {
        self.check_at(account_id, kind, Instant::now())
    }

    fn check_at(
        &self,
        account_id: &str,
        kind: CallKind,
        now: Instant,
    ) -> Result<(), RateLimitError> {
        let mut windows = self.windows.lock().unwrap();
        let window = windows
            .entry(account_id.to_string())
            .or_insert_with(|| UsageWindow::new(now));

        if window.expired(self.tier.window(), now) {
            window.reset(now);
        }

        let weight = kind.weight();
        if window.score() + weight > self.tier.budget() {
            let retry_after = window.remaining(self.tier.window(), now);
            debug!(
                account_id,
                score = window.score(),
                weight,
                budget = self.tier.budget(),
                retry_after_secs = retry_after.as_secs(),
                "admission rejected"
            );
            return Err(RateLimitError::new(RateLimitErrorKind::LimitExceeded {
                account_id: account_id.to_string(),
                retry_after,
            }));
        }

        window.add(weight);
        debug!(
            account_id,
            score = window.score(),
            budget = self.tier.budget(),
            "admission granted"
        );
        Ok(())
    }

    /// Current score and remaining window time for an account, if it has one.
    pub fn usage(&self, account_id: &str) -> Option<(u32, Duration)> {
        let windows = self.windows.lock().unwrap();
        windows.get(account_id).map(|window| {
            (
                window.score(),
                window.remaining(self.tier.window(), Instant::now()),
            )
        })
    }
}
