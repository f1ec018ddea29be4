//! Signed session credentials.
//!
//! Session tokens are HS256 JWTs minted and verified locally. Verification
//! failures of every sort (malformed input, a bad signature, expiry)
//! collapse to `None`, so callers treat "no session" uniformly and nothing
//! leaks about why a token was rejected.

use crate::{SessionError, SessionErrorKind, SessionResult};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    nbf: i64,
    exp: i64,
    jti: String,
}

/// Mint a signed, time-limited session token for `user_id`.
pub(crate) fn create_session_token(
    signing_key: &str,
    user_id: &str,
    ttl: Duration,
) -> SessionResult<String> {
    let issued_at = Utc::now();
    let ttl = chrono::Duration::from_std(ttl).map_err(|e| {
        SessionError::new(SessionErrorKind::Signing(format!(
            "session ttl out of range: {e}"
        )))
    })?;
    let expires_at = issued_at + ttl;

    let claims = SessionClaims {
        sub: user_id.to_string(),
        iat: issued_at.timestamp(),
        nbf: issued_at.timestamp(),
        exp: expires_at.timestamp(),
        jti: format!("sess_{}", Uuid::new_v4().simple()),
    };
    let header = serde_json::json!({"alg": "HS256", "typ": "JWT"});

    let header_bytes = serde_json::to_vec(&header)
        .map_err(|e| SessionError::new(SessionErrorKind::Signing(e.to_string())))?;
    let claims_bytes = serde_json::to_vec(&claims)
        .map_err(|e| SessionError::new(SessionErrorKind::Signing(e.to_string())))?;

    let header_segment = URL_SAFE_NO_PAD.encode(header_bytes);
    let claims_segment = URL_SAFE_NO_PAD.encode(claims_bytes);
    let signing_input = format!("{header_segment}.{claims_segment}");

    let mut mac = HmacSha256::new_from_slice(signing_key.as_bytes()).map_err(|e| {
        SessionError::new(SessionErrorKind::Signing(format!(
            "failed to initialize signer: {e}"
        )))
    })?;
    mac.update(signing_input.as_bytes());
    let signature_segment = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature_segment}"))
}

/// Verify a session token and return its subject, or `None`.
pub(crate) fn verify_session_token(signing_key: &str, token: &str) -> Option<String> {
    let mut segments = token.split('.');
    let header_segment = segments.next()?;
    let claims_segment = segments.next()?;
    let signature_segment = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let signature = URL_SAFE_NO_PAD.decode(signature_segment).ok()?;
    let signing_input = format!("{header_segment}.{claims_segment}");
    let mut mac = HmacSha256::new_from_slice(signing_key.as_bytes()).ok()?;
    mac.update(signing_input.as_bytes());
    if mac.verify_slice(&signature).is_err() {
        debug!("session token signature mismatch");
        return None;
    }

    let claims_bytes = URL_SAFE_NO_PAD.decode(claims_segment).ok()?;
    let claims: SessionClaims = serde_json::from_slice(&claims_bytes).ok()?;

    let now = Utc::now().timestamp();
    if claims.exp <= now || claims.nbf > now {
        debug!("session token outside its validity window");
        return None;
    }

    Some(claims.sub)
}
