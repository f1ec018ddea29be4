//! OAuth flows against the provider token endpoint.
//!
//! A token-endpoint outage is not fundamentally different from a
//! data-endpoint outage: both flows here run through the retry engine and
//! classify failures with the same HTTP-boundary function as ordinary API
//! calls.

use crate::manager::SessionConfig;
use crate::records::UserTokens;
use admast_error::{ApiError, classify_response};
use admast_retry::{RetryConfig, retry_with_backoff};
use chrono::Utc;
use serde::Deserialize;

/// Wire shape of the provider token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    token_type: String,
    expires_in: Option<u64>,
    scope: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenResponse {
    /// Fold into a stored record. A refresh response that omits
    /// `refresh_token` keeps the previously stored one.
    pub(crate) fn into_tokens(self, previous_refresh: Option<String>) -> UserTokens {
        UserTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            token_type: self.token_type,
            expires_in: self.expires_in,
            scope: self
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            obtained_at: Utc::now(),
        }
    }
}

pub(crate) async fn exchange_code(
    http: &reqwest::Client,
    retry: &RetryConfig,
    config: &SessionConfig,
    code: &str,
) -> Result<TokenResponse, ApiError> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];
    request_tokens(http, retry, config, "oauth.exchange_code", &params).await
}

pub(crate) async fn refresh(
    http: &reqwest::Client,
    retry: &RetryConfig,
    config: &SessionConfig,
    refresh_token: &str,
) -> Result<TokenResponse, ApiError> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
    ];
    request_tokens(http, retry, config, "oauth.refresh", &params).await
}

async fn request_tokens(
    http: &reqwest::Client,
    retry: &RetryConfig,
    config: &SessionConfig,
    label: &str,
    params: &[(&str, &str)],
) -> Result<TokenResponse, ApiError> {
    retry_with_backoff(retry, label, || async move {
        let response = http
            .post(&config.token_endpoint)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::network(format!("token endpoint timed out: {e}"))
                } else {
                    ApiError::network(format!("token endpoint unreachable: {e}"))
                }
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("failed to read token response: {e}")))?;
        if !status.is_success() {
            return Err(classify_response(status.as_u16(), &body));
        }
        serde_json::from_str::<TokenResponse>(&body)
            .map_err(|e| ApiError::response(format!("malformed token response: {e}")))
    })
    .await
}
