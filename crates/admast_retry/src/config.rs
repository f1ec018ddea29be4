//! Backoff schedule configuration.

use serde::{Deserialize, Serialize};

/// Bounds on the backoff schedule.
///
/// The exact numbers are deployment configuration, not an API contract. The
/// defaults ride out a short provider brownout without amplifying load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Re-attempts allowed after the initial call.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Initial backoff delay in milliseconds; doubles per attempt.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Ceiling on any single backoff delay, in seconds.
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
}

fn default_max_retries() -> usize {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_secs() -> u64 {
    30
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_secs: default_max_delay_secs(),
        }
    }
}
