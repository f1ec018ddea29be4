//! Layered configuration for the access layer.
//!
//! Precedence, later sources overriding earlier: bundled defaults
//! (admast.toml shipped with the library), `~/.config/admast/admast.toml`,
//! `./admast.toml`. Secrets are never read from files; the session signing
//! key and the OAuth client secret come from the environment
//! (`ADMAST_SIGNING_KEY`, `ADMAST_APP_SECRET`), with `.env` files honored.

use admast_client::{ApiClient, ApiConfig};
use admast_error::{AdmastResult, ConfigError};
use admast_rate_limit::{AccessTier, RateLimiter};
use admast_retry::RetryConfig;
use admast_session::{SessionConfig, SessionManager, SessionStore};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Provider endpoint settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Base URL of the provider REST API.
    pub base_url: String,
    /// Versioned path prefix, e.g. `v19.0`.
    pub api_version: String,
    /// Transport timeout per attempt, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Admission tier selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateLimitSettings {
    /// Access tier name: `development` or `standard`.
    pub tier: String,
}

/// Session and token lifecycle settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Hard ceiling on a session's lifetime, in seconds.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// Store TTL for provider token records, in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Refresh the access token within this window of expiry, in seconds.
    #[serde(default = "default_refresh_leeway_secs")]
    pub refresh_leeway_secs: u64,
    /// Provider OAuth token endpoint.
    pub token_endpoint: String,
    /// OAuth client id for this application.
    pub client_id: String,
    /// Redirect URI registered with the provider.
    #[serde(default)]
    pub redirect_uri: String,
}

fn default_session_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

fn default_token_ttl_secs() -> u64 {
    60 * 24 * 60 * 60
}

fn default_refresh_leeway_secs() -> u64 {
    300
}

/// Top-level admast configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AdmastConfig {
    /// Provider endpoint settings.
    pub provider: ProviderSettings,
    /// Admission tier selection.
    pub rate_limit: RateLimitSettings,
    /// Backoff schedule bounds.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Session and token lifecycle settings.
    pub session: SessionSettings,
}

impl AdmastConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> AdmastResult<Self> {
        debug!("loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "failed to read configuration from {}: {e}",
                    path.as_ref().display()
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("failed to parse configuration: {e}")).into())
    }

    /// Load configuration with precedence: current dir > home dir > bundled
    /// defaults.
    #[instrument]
    pub fn load() -> AdmastResult<Self> {
        debug!("loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../admast.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/admast/admast.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("admast").required(false));

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("failed to build configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("failed to parse configuration: {e}")).into())
    }

    /// Parse the configured access tier.
    pub fn tier(&self) -> AdmastResult<AccessTier> {
        AccessTier::from_str(&self.rate_limit.tier).map_err(|_| {
            ConfigError::new(format!("unknown access tier: {}", self.rate_limit.tier)).into()
        })
    }

    /// Provider endpoint configuration for the orchestrator.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.provider.base_url.clone(),
            api_version: self.provider.api_version.clone(),
            timeout: Duration::from_secs(self.provider.timeout_secs),
        }
    }

    /// Session lifecycle configuration, pulling secrets from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `ADMAST_SIGNING_KEY` or `ADMAST_APP_SECRET` is
    /// not set.
    pub fn session_config(&self) -> AdmastResult<SessionConfig> {
        dotenvy::dotenv().ok();

        let signing_key = std::env::var("ADMAST_SIGNING_KEY")
            .map_err(|_| ConfigError::new("ADMAST_SIGNING_KEY is not set"))?;
        let client_secret = std::env::var("ADMAST_APP_SECRET")
            .map_err(|_| ConfigError::new("ADMAST_APP_SECRET is not set"))?;

        let mut session = SessionConfig::new(
            signing_key,
            self.session.token_endpoint.clone(),
            self.session.client_id.clone(),
            client_secret,
            self.session.redirect_uri.clone(),
        );
        session.session_ttl = Duration::from_secs(self.session.session_ttl_secs);
        session.token_ttl = Duration::from_secs(self.session.token_ttl_secs);
        session.refresh_leeway = Duration::from_secs(self.session.refresh_leeway_secs);
        Ok(session)
    }

    /// Assemble the full access layer over an injected store.
    #[instrument(skip(self, store))]
    pub fn build_client(
        &self,
        store: Arc<dyn SessionStore>,
    ) -> AdmastResult<(ApiClient, Arc<SessionManager>)> {
        let sessions = Arc::new(SessionManager::new(
            store,
            self.session_config()?,
            self.retry,
        ));
        let limiter = Arc::new(RateLimiter::new(self.tier()?));
        let client = ApiClient::new(self.api_config(), limiter, self.retry, sessions.clone())?;
        Ok((client, sessions))
    }
}
