//! admast: a resilient multi-tenant access layer for a provider's
//! advertising REST API.
//!
//! Every tool call passes through the same path: resolve the caller's
//! credentials, admission-check the tenant's weighted budget, execute under
//! bounded retry, and normalize cursor pagination. This facade crate wires
//! the pieces together from layered configuration and re-exports the public
//! surface of the component crates.
//!
//! # Example
//!
//! ```no_run
//! use admast::{AdmastConfig, ApiRequest, MemoryStore};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! admast::init_telemetry()?;
//!
//! let config = AdmastConfig::load()?;
//! let (client, sessions) = config.build_client(Arc::new(MemoryStore::new()))?;
//!
//! // A session token arrives on the tool-call boundary.
//! let token = sessions.create_session_token("user_1")?;
//! let user_id = sessions.verify_session_token(&token).expect("fresh token");
//!
//! let campaigns = client
//!     .execute_list(
//!         &user_id,
//!         &ApiRequest::get("act_123/campaigns").with_param("limit", 25),
//!     )
//!     .await?;
//! println!("fetched {} campaigns", campaigns.data.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod telemetry;

pub use config::{AdmastConfig, ProviderSettings, RateLimitSettings, SessionSettings};
pub use telemetry::init_telemetry;

pub use admast_client::{ApiClient, ApiConfig, ApiRequest, DEFAULT_BATCH_SIZE};
pub use admast_core::{
    ACCOUNT_ID_PREFIX, BatchOutcome, Page, Paging, PagingCursors, normalize_account_id,
    resolve_account_id, split_batches,
};
pub use admast_error::{
    AdmastError, AdmastErrorKind, AdmastResult, ApiError, ApiErrorKind, ConfigError, JsonError,
    ProviderError, classify_response,
};
pub use admast_rate_limit::{
    AccessTier, CallKind, RateLimitError, RateLimitErrorKind, RateLimiter, UsageWindow,
};
pub use admast_retry::{RetryConfig, retry_with_backoff};
pub use admast_session::{
    MemoryStore, SessionConfig, SessionError, SessionErrorKind, SessionManager, SessionStore,
    UserAuth, UserSession, UserTokens,
};
