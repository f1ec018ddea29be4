//! Session and token lifecycle management.

use crate::records::{UserAuth, UserSession, UserTokens};
use crate::store::SessionStore;
use crate::{SessionError, SessionErrorKind, SessionResult, oauth, token};
use admast_error::ApiError;
use admast_retry::RetryConfig;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Lifecycle configuration for sessions and provider tokens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC key for session token signing.
    pub signing_key: String,
    /// Hard ceiling on a session's lifetime.
    pub session_ttl: Duration,
    /// Store TTL for provider token records.
    pub token_ttl: Duration,
    /// Refresh the access token when it is within this window of expiry.
    pub refresh_leeway: Duration,
    /// Provider OAuth token endpoint.
    pub token_endpoint: String,
    /// OAuth client id for this application.
    pub client_id: String,
    /// OAuth client secret for this application.
    pub client_secret: String,
    /// Redirect URI registered with the provider.
    pub redirect_uri: String,
}

impl SessionConfig {
    /// Lifecycle defaults: 7-day sessions, 60-day token records, 5-minute
    /// refresh leeway.
    pub fn new(
        signing_key: impl Into<String>,
        token_endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            signing_key: signing_key.into(),
            session_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            token_ttl: Duration::from_secs(60 * 24 * 60 * 60),
            refresh_leeway: Duration::from_secs(300),
            token_endpoint: token_endpoint.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

fn session_key(user_id: &str) -> String {
    format!("session:{user_id}")
}

fn token_key(user_id: &str) -> String {
    format!("tokens:{user_id}")
}

/// Manages per-user sessions and provider OAuth credentials.
///
/// Every store key is derived from the user id, so two concurrent requests
/// for different users cannot observe each other's records. Token records
/// deliberately outlive sessions (60 days vs 7): a returning user gets a new
/// session issued without re-running the OAuth dance.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    http: reqwest::Client,
    retry: RetryConfig,
    config: SessionConfig,
}

impl SessionManager {
    /// Create a manager over an injected store.
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig, retry: RetryConfig) -> Self {
        Self {
            store,
            http: reqwest::Client::new(),
            retry,
            config,
        }
    }

    /// Mint a signed, time-limited session token for `user_id`.
    #[instrument(skip(self))]
    pub fn create_session_token(&self, user_id: &str) -> SessionResult<String> {
        token::create_session_token(&self.config.signing_key, user_id, self.config.session_ttl)
    }

    /// Verify a presented session token.
    ///
    /// Returns the user id, or `None` for any rejection: expired, forged,
    /// and malformed tokens are indistinguishable to the caller.
    pub fn verify_session_token(&self, token: &str) -> Option<String> {
        token::verify_session_token(&self.config.signing_key, token)
    }

    /// Persist a session under its remaining hard TTL.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn store_user_session(&self, session: &UserSession) -> SessionResult<()> {
        let value = serde_json::to_string(session)
            .map_err(|e| SessionError::new(SessionErrorKind::Serialization(e.to_string())))?;
        let ttl = session
            .remaining_ttl(self.config.session_ttl, Utc::now())
            .unwrap_or(Duration::ZERO);
        self.store
            .set(&session_key(&session.user_id), value, ttl)
            .await
    }

    /// Fetch a session, refreshing its `last_used` marker.
    ///
    /// The re-persist uses the remaining hard TTL, so usage metadata never
    /// extends a session's life.
    #[instrument(skip(self))]
    pub async fn get_user_session(&self, user_id: &str) -> SessionResult<Option<UserSession>> {
        let Some(raw) = self.store.get(&session_key(user_id)).await? else {
            return Ok(None);
        };
        let mut session: UserSession = serde_json::from_str(&raw)
            .map_err(|e| SessionError::new(SessionErrorKind::Serialization(e.to_string())))?;

        let now = Utc::now();
        let Some(remaining) = session.remaining_ttl(self.config.session_ttl, now) else {
            // The hard ceiling passed while the store entry lingered.
            debug!(user_id, "session past its hard ttl");
            self.store.delete(&session_key(user_id)).await?;
            return Ok(None);
        };

        session.touch(now);
        let value = serde_json::to_string(&session)
            .map_err(|e| SessionError::new(SessionErrorKind::Serialization(e.to_string())))?;
        self.store
            .set(&session_key(user_id), value, remaining)
            .await?;
        Ok(Some(session))
    }

    /// Persist provider tokens for `user_id` on the token TTL.
    #[instrument(skip(self, tokens))]
    pub async fn store_user_tokens(&self, user_id: &str, tokens: &UserTokens) -> SessionResult<()> {
        let value = serde_json::to_string(tokens)
            .map_err(|e| SessionError::new(SessionErrorKind::Serialization(e.to_string())))?;
        self.store
            .set(&token_key(user_id), value, self.config.token_ttl)
            .await
    }

    /// Fetch stored provider tokens.
    pub async fn get_user_tokens(&self, user_id: &str) -> SessionResult<Option<UserTokens>> {
        let Some(raw) = self.store.get(&token_key(user_id)).await? else {
            return Ok(None);
        };
        let tokens = serde_json::from_str(&raw)
            .map_err(|e| SessionError::new(SessionErrorKind::Serialization(e.to_string())))?;
        Ok(Some(tokens))
    }

    /// Drop a user's session and token records.
    #[instrument(skip(self))]
    pub async fn revoke(&self, user_id: &str) -> SessionResult<()> {
        self.store.delete(&session_key(user_id)).await?;
        self.store.delete(&token_key(user_id)).await
    }

    /// Opaque credential holder for the orchestrator.
    ///
    /// `None` when the user holds no token record; raw tokens are never
    /// exposed past this seam.
    #[instrument(skip(self))]
    pub async fn user_auth(&self, user_id: &str) -> SessionResult<Option<UserAuth>> {
        Ok(self
            .get_user_tokens(user_id)
            .await?
            .map(|tokens| UserAuth::new(tokens.access_token)))
    }

    /// Resolve fresh credentials for a call, refreshing lazily at point of
    /// use.
    ///
    /// Validity is checked here, synchronously, rather than on a background
    /// timer; a failed refresh surfaces as an authentication error to this
    /// request only and never invalidates other in-flight requests for the
    /// same user.
    #[instrument(skip(self))]
    pub async fn ensure_fresh_auth(&self, user_id: &str) -> Result<Option<UserAuth>, ApiError> {
        let Some(tokens) = self.get_user_tokens(user_id).await.map_err(ApiError::from)? else {
            return Ok(None);
        };

        if tokens.expires_within(self.config.refresh_leeway, Utc::now()) {
            if tokens.refresh_token.is_none() {
                return Err(ApiError::authentication(
                    "access token expired and no refresh token is stored",
                ));
            }
            debug!(user_id, "access token near expiry, refreshing");
            self.refresh_user_token(user_id).await?;
            return self.user_auth(user_id).await.map_err(ApiError::from);
        }

        Ok(Some(UserAuth::new(tokens.access_token)))
    }

    /// Exchange an authorization code for provider tokens.
    ///
    /// Classified and retried like any provider call. The caller decides
    /// which user the returned record belongs to and persists it via
    /// [`store_user_tokens`](Self::store_user_tokens).
    #[instrument(skip(self, code))]
    pub async fn exchange_code_for_tokens(&self, code: &str) -> Result<UserTokens, ApiError> {
        let response = oauth::exchange_code(&self.http, &self.retry, &self.config, code).await?;
        Ok(response.into_tokens(None))
    }

    /// Refresh `user_id`'s access token in place.
    ///
    /// Returns whether a refresh happened; `false` means no stored record or
    /// no refresh token to use.
    #[instrument(skip(self))]
    pub async fn refresh_user_token(&self, user_id: &str) -> Result<bool, ApiError> {
        let Some(stored) = self.get_user_tokens(user_id).await.map_err(ApiError::from)? else {
            return Ok(false);
        };
        let Some(refresh_token) = stored.refresh_token.clone() else {
            debug!(user_id, "no refresh token stored");
            return Ok(false);
        };

        let response = oauth::refresh(&self.http, &self.retry, &self.config, &refresh_token).await?;
        let tokens = response.into_tokens(Some(refresh_token));
        self.store_user_tokens(user_id, &tokens)
            .await
            .map_err(ApiError::from)?;
        info!(user_id, "provider tokens refreshed");
        Ok(true)
    }
}
