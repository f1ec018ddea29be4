//! Provider endpoint configuration.

use std::time::Duration;

/// Provider REST endpoint settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the provider REST API.
    pub base_url: String,
    /// Versioned path prefix, e.g. `v19.0`.
    pub api_version: String,
    /// Transport-level timeout for a single attempt. Timeouts classify as
    /// retryable network errors.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://graph.facebook.com".to_string(),
            api_version: "v19.0".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Full URL for a provider path.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            path.trim_start_matches('/')
        )
    }
}
