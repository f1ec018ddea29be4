//! Retry/backoff engine for classified provider errors.
//!
//! [`retry_with_backoff`] wraps an arbitrary asynchronous operation without
//! knowing what it does. Classification is delegated to
//! [`admast_error::ApiError::is_retryable`]: transient failures (throttling,
//! provider 5xx, transport errors) re-invoke the operation under an
//! exponential, jittered schedule; fatal failures propagate on the first
//! attempt. Attempts are strictly sequential; an outage is never answered
//! with parallel retries.

mod config;
mod retry;

pub use config::RetryConfig;
pub use retry::retry_with_backoff;
