//! Stored session and token records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A user's login session.
///
/// Lifetime is bounded by a fixed hard TTL measured from `created_at`;
/// `last_used` is sliding usage metadata refreshed on every successful
/// lookup and never extends that ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub provider_user_id: String,
    pub created_at: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
}

impl UserSession {
    /// Create a fresh session stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        provider_user_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            email: email.into(),
            name: name.into(),
            provider_user_id: provider_user_id.into(),
            created_at: now,
            last_used: now,
        }
    }

    /// Remaining lifetime under the hard ceiling, or `None` once it passed.
    pub fn remaining_ttl(&self, session_ttl: Duration, now: DateTime<Utc>) -> Option<Duration> {
        let ttl = chrono::Duration::from_std(session_ttl).ok()?;
        let expires_at = self.created_at.checked_add_signed(ttl)?;
        let remaining = expires_at - now;
        if remaining <= chrono::Duration::zero() {
            None
        } else {
            remaining.to_std().ok()
        }
    }

    /// Refresh the sliding usage marker.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_used = now;
    }
}

/// Provider OAuth credentials for one user.
///
/// Outlives the session on purpose: re-authentication against the provider
/// is expensive, so a valid token record allows re-issuing a session without
/// re-running the OAuth dance. Never handed to tool handlers; the
/// orchestrator sees only [`UserAuth`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    /// Provider-reported lifetime in seconds; `None` means a long-lived
    /// token with no self-expiry.
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Vec<String>,
    /// When this record was obtained, for expiry detection at point of use.
    pub obtained_at: DateTime<Utc>,
}

impl UserTokens {
    /// Whether the access token is within `leeway` of its provider expiry.
    pub fn expires_within(&self, leeway: Duration, now: DateTime<Utc>) -> bool {
        let Some(expires_in) = self.expires_in else {
            return false;
        };
        let expires_at = self.obtained_at + chrono::Duration::seconds(expires_in as i64);
        let leeway =
            chrono::Duration::from_std(leeway).unwrap_or_else(|_| chrono::Duration::zero());
        now + leeway >= expires_at
    }
}

// Bearer material stays out of logs.
impl fmt::Debug for UserTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserTokens")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("obtained_at", &self.obtained_at)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}

/// Opaque per-call credential holder handed to the orchestrator.
#[derive(Clone)]
pub struct UserAuth {
    access_token: String,
}

impl UserAuth {
    pub(crate) fn new(access_token: String) -> Self {
        Self { access_token }
    }

    /// The bearer credential for the Authorization header.
    pub fn bearer(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for UserAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAuth").finish_non_exhaustive()
    }
}
