//! Behavioral tests for the retry engine.

use admast_error::{ApiError, ApiErrorKind};
use admast_retry::{RetryConfig, retry_with_backoff};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

fn fast_config() -> RetryConfig {
    RetryConfig {
        max_retries: 3,
        base_delay_ms: 1,
        max_delay_secs: 1,
    }
}

#[tokio::test]
async fn transient_failures_resolve_after_k_retries() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result = retry_with_backoff(&fast_config(), "oauth.token", move || {
        let calls = counter.clone();
        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(ApiError::server(500, "upstream unavailable"))
            } else {
                Ok(42u32)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn fatal_error_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result: Result<(), ApiError> =
        retry_with_backoff(&fast_config(), "campaigns.create", move || {
            let calls = counter.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::validation("objective is required"))
            }
        })
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err.kind(), ApiErrorKind::Validation(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn authentication_failure_is_not_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result: Result<(), ApiError> =
        retry_with_backoff(&fast_config(), "campaigns.list", move || {
            let calls = counter.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::authentication("access token expired"))
            }
        })
        .await;

    assert!(matches!(
        result.unwrap_err().kind(),
        ApiErrorKind::Authentication(_)
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn exhaustion_returns_the_last_error() {
    let config = RetryConfig {
        max_retries: 2,
        base_delay_ms: 1,
        max_delay_secs: 1,
    };
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result: Result<(), ApiError> = retry_with_backoff(&config, "insights.get", move || {
        let calls = counter.clone();
        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(ApiError::server(503, format!("brownout attempt {n}")))
        }
    })
    .await;

    let err = result.unwrap_err();
    // 1 initial attempt + 2 re-attempts; the surfaced error is the third.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(err.to_string().contains("brownout attempt 3"));
}

#[tokio::test]
async fn provider_hint_overrides_the_schedule() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let started = Instant::now();

    let result = retry_with_backoff(&fast_config(), "audiences.upload", move || {
        let calls = counter.clone();
        async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ApiError::rate_limited(
                    "application request limit reached",
                    Some(Duration::from_millis(200)),
                ))
            } else {
                Ok("done")
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "done");
    // The 1ms base schedule alone would finish almost instantly; the hint
    // stretches the wait.
    assert!(started.elapsed() >= Duration::from_millis(100));
}
