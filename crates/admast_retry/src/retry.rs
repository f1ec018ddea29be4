//! Exponential backoff execution wrapper.

use crate::RetryConfig;
use admast_error::ApiError;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, warn};

/// Execute `operation` with exponential backoff.
///
/// Fatal classifications propagate after the first attempt. Retryable ones
/// re-invoke the operation until `config.max_retries` re-attempts are
/// exhausted, after which the *most recent* classified error is returned:
/// callers diagnosing a flapping dependency need the latest failure mode,
/// not the first.
///
/// When the failure carries a [`retry_after`](ApiError::retry_after) hint
/// (provider throttling, admission rejections), the hint is honored over the
/// computed schedule.
///
/// `label` names the logical operation in attempt logs.
pub async fn retry_with_backoff<T, F, Fut>(
    config: &RetryConfig,
    label: &str,
    mut operation: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let strategy = ExponentialBackoff::from_millis(config.base_delay_ms)
        .factor(2)
        .max_delay(Duration::from_secs(config.max_delay_secs))
        .map(jitter)
        .take(config.max_retries);

    let mut attempt = 0usize;
    Retry::spawn(strategy, || {
        attempt += 1;
        debug!(label, attempt, "dispatching attempt");
        let fut = operation();
        async move {
            match fut.await {
                Ok(value) => Ok(value),
                Err(err) if err.is_retryable() => {
                    let retry_after = err.retry_after();
                    warn!(
                        label,
                        attempt,
                        error = %err,
                        retry_after_ms = retry_after.map(|d| d.as_millis() as u64),
                        "transient failure"
                    );
                    Err(RetryError::Transient { err, retry_after })
                }
                Err(err) => {
                    warn!(label, attempt, error = %err, "permanent failure");
                    Err(RetryError::Permanent(err))
                }
            }
        }
    })
    .await
}
