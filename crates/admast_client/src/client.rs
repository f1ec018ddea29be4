//! The API client orchestrator.

use crate::params::encode_params;
use crate::{ApiConfig, ApiRequest};
use admast_core::{BatchOutcome, Page, resolve_account_id, split_batches};
use admast_error::{ApiError, ApiErrorKind, classify_response};
use admast_rate_limit::{CallKind, RateLimiter};
use admast_retry::{RetryConfig, retry_with_backoff};
use admast_session::SessionManager;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Provider cap on membership-style bulk uploads.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Orchestrates provider calls: credentials, admission, retry, pagination.
///
/// Construction is explicit injection: the limiter and session manager are
/// owned by the caller's composition root, never globals, so tests assemble
/// isolated stacks.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    limiter: Arc<RateLimiter>,
    retry: RetryConfig,
    sessions: Arc<SessionManager>,
}

impl ApiClient {
    /// Build a client over shared components.
    ///
    /// # Errors
    /// Fails when the HTTP transport cannot be constructed.
    pub fn new(
        config: ApiConfig,
        limiter: Arc<RateLimiter>,
        retry: RetryConfig,
        sessions: Arc<SessionManager>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::network(format!("failed to build HTTP transport: {e}")))?;
        Ok(Self {
            http,
            config,
            limiter,
            retry,
            sessions,
        })
    }

    /// The session manager this client resolves credentials through.
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// The admission gate this client spends budget against.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Execute one logical operation and return the raw JSON payload.
    ///
    /// GET operations are idempotent and retried freely. POST and DELETE
    /// retries rely on the provider's per-resource-id idempotence for
    /// create/update/delete; that property is part of this contract and is
    /// not re-derived per call site.
    ///
    /// Calls with no resolvable account id skip budget admission: some
    /// endpoints are not account-scoped. A caller routing everything through
    /// bare object ids therefore bypasses budgeting; this is a known
    /// limitation of the provider's addressing scheme, not a guarantee.
    #[instrument(skip(self, request), fields(operation = %request.label()))]
    pub async fn execute(&self, user_id: &str, request: &ApiRequest) -> Result<Value, ApiError> {
        let Some(auth) = self.sessions.ensure_fresh_auth(user_id).await? else {
            return Err(ApiError::authentication(format!(
                "no provider credentials for user {user_id}"
            )));
        };

        let account_id = resolve_account_id(request.account_id(), request.leading_object_id());
        let kind = if request.method() == &Method::GET {
            CallKind::Read
        } else {
            CallKind::Write
        };
        if account_id.is_none() {
            debug!(operation = %request.label(), "call is not account-scoped, skipping admission");
        }

        let label = request.label();
        let url = self.config.endpoint(request.path());
        let encoded = encode_params(request.params());

        retry_with_backoff(&self.retry, &label, || {
            let account_id = account_id.clone();
            let method = request.method().clone();
            let url = url.clone();
            let encoded = encoded.clone();
            let bearer = auth.bearer().to_string();
            async move {
                if let Some(account) = account_id.as_deref() {
                    self.limiter.check(account, kind).map_err(ApiError::from)?;
                }

                let builder = self
                    .http
                    .request(method.clone(), url.as_str())
                    .bearer_auth(&bearer);
                let builder = if method == Method::POST {
                    builder.form(&encoded)
                } else {
                    builder.query(&encoded)
                };

                let response = builder.send().await.map_err(|e| {
                    if e.is_timeout() {
                        ApiError::network(format!("request timed out: {e}"))
                    } else {
                        ApiError::network(format!("request failed: {e}"))
                    }
                })?;
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| ApiError::network(format!("failed to read response body: {e}")))?;

                if !status.is_success() {
                    let err = classify_response(status.as_u16(), &body);
                    // The provider reports throttling without a usable
                    // retry-after; fall back to the tier's published block.
                    let err = if matches!(err.kind(), ApiErrorKind::RateLimited(_))
                        && err.retry_after().is_none()
                    {
                        err.with_retry_after(self.limiter.tier().block_duration())
                    } else {
                        err
                    };
                    return Err(err);
                }

                serde_json::from_str::<Value>(&body)
                    .map_err(|e| ApiError::response(format!("malformed response body: {e}")))
            }
        })
        .await
    }

    /// Execute a list-shaped operation and normalize its paging envelope.
    ///
    /// To fetch the next page, re-invoke with the returned `cursor_after` as
    /// the `after` parameter. The walker never advances on its own, keeping
    /// each fetch a single deterministic operation under retry.
    pub async fn execute_list(
        &self,
        user_id: &str,
        request: &ApiRequest,
    ) -> Result<Page<Value>, ApiError> {
        let payload = self.execute(user_id, request).await?;
        Page::from_value(payload).map_err(|e| ApiError::response(e.to_string()))
    }

    /// Submit `items` in provider-sized chunks under `array_param`.
    ///
    /// Chunks are submitted sequentially; each chunk's outcome is recorded
    /// independently and one failure never aborts the remainder. The
    /// aggregate reports succeeded/failed counts plus the triggering error
    /// messages.
    #[instrument(skip(self, request, items), fields(operation = %request.label(), total = items.len()))]
    pub async fn execute_chunked(
        &self,
        user_id: &str,
        request: &ApiRequest,
        array_param: &str,
        items: Vec<Value>,
        chunk_size: usize,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::new();
        for (index, chunk) in split_batches(items, chunk_size).into_iter().enumerate() {
            let chunk_request = request.clone().with_param(array_param, Value::Array(chunk));
            match self.execute(user_id, &chunk_request).await {
                Ok(_) => outcome.record_success(),
                Err(err) => {
                    debug!(chunk = index, error = %err, "chunk submission failed");
                    outcome.record_failure(err.to_string());
                }
            }
        }
        outcome
    }
}
