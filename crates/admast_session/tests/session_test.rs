//! Lifecycle tests for the session manager over an in-memory store.

use admast_retry::RetryConfig;
use admast_session::{MemoryStore, SessionConfig, SessionManager, UserSession, UserTokens};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

fn test_manager() -> SessionManager {
    let config = SessionConfig::new(
        "test-signing-key",
        "https://provider.test/oauth/access_token",
        "client-id",
        "client-secret",
        "https://app.test/callback",
    );
    SessionManager::new(Arc::new(MemoryStore::new()), config, RetryConfig::default())
}

fn tokens(access_token: &str) -> UserTokens {
    UserTokens {
        access_token: access_token.to_string(),
        refresh_token: Some(format!("refresh-{access_token}")),
        token_type: "bearer".to_string(),
        expires_in: Some(3600),
        scope: vec!["ads_read".to_string(), "ads_management".to_string()],
        obtained_at: Utc::now(),
    }
}

#[tokio::test]
async fn token_records_are_isolated_per_user() {
    let manager = test_manager();
    manager
        .store_user_tokens("user_a", &tokens("token-a"))
        .await
        .unwrap();
    manager
        .store_user_tokens("user_b", &tokens("token-b"))
        .await
        .unwrap();

    let a = manager.get_user_tokens("user_a").await.unwrap().unwrap();
    let b = manager.get_user_tokens("user_b").await.unwrap().unwrap();
    assert_eq!(a.access_token, "token-a");
    assert_eq!(b.access_token, "token-b");
    assert_eq!(manager.get_user_tokens("user_c").await.unwrap(), None);
}

#[tokio::test]
async fn session_token_round_trip() {
    let manager = test_manager();
    let token = manager.create_session_token("user_1").unwrap();
    assert_eq!(
        manager.verify_session_token(&token).as_deref(),
        Some("user_1")
    );
}

#[tokio::test]
async fn rejected_session_tokens_collapse_to_none() {
    let manager = test_manager();
    let token = manager.create_session_token("user_1").unwrap();

    // Forged signature.
    let mut forged = token.clone();
    forged.truncate(token.len() - 4);
    forged.push_str("AAAA");
    assert_eq!(manager.verify_session_token(&forged), None);

    // Garbage.
    assert_eq!(manager.verify_session_token("definitely.not.jwt"), None);
    assert_eq!(manager.verify_session_token(""), None);
}

#[tokio::test]
async fn session_lookup_refreshes_last_used() {
    let manager = test_manager();
    let session = UserSession::new("user_1", "u@example.com", "U. Ser", "fb_123");
    manager.store_user_session(&session).await.unwrap();

    let fetched = manager
        .get_user_session("user_1")
        .await
        .unwrap()
        .expect("session should be live");
    assert_eq!(fetched.created_at, session.created_at);
    assert!(fetched.last_used >= session.last_used);
    assert_eq!(fetched.email, "u@example.com");
}

#[tokio::test]
async fn session_past_hard_ttl_is_gone() {
    let manager = test_manager();
    let now = Utc::now();
    let session = UserSession {
        user_id: "user_old".to_string(),
        email: "old@example.com".to_string(),
        name: "Old".to_string(),
        provider_user_id: "fb_old".to_string(),
        created_at: now - chrono::Duration::days(8),
        last_used: now - chrono::Duration::days(8),
    };
    manager.store_user_session(&session).await.unwrap();
    assert_eq!(manager.get_user_session("user_old").await.unwrap(), None);
}

#[tokio::test]
async fn user_auth_is_none_without_tokens() {
    let manager = test_manager();
    assert!(manager.user_auth("user_missing").await.unwrap().is_none());
}

#[tokio::test]
async fn user_auth_redacts_bearer_material() {
    let manager = test_manager();
    manager
        .store_user_tokens("user_1", &tokens("super-secret"))
        .await
        .unwrap();
    let auth = manager.user_auth("user_1").await.unwrap().unwrap();
    assert_eq!(auth.bearer(), "super-secret");
    assert!(!format!("{auth:?}").contains("super-secret"));
}

#[tokio::test]
async fn revoke_drops_both_records() {
    let manager = test_manager();
    let session = UserSession::new("user_1", "u@example.com", "U. Ser", "fb_123");
    manager.store_user_session(&session).await.unwrap();
    manager
        .store_user_tokens("user_1", &tokens("token-1"))
        .await
        .unwrap();

    manager.revoke("user_1").await.unwrap();
    assert_eq!(manager.get_user_session("user_1").await.unwrap(), None);
    assert_eq!(manager.get_user_tokens("user_1").await.unwrap(), None);
}

#[tokio::test]
async fn refresh_without_stored_tokens_is_a_noop() {
    let manager = test_manager();
    assert!(!manager.refresh_user_token("user_none").await.unwrap());
}

#[test]
fn expiry_detection_respects_leeway() {
    let now = Utc::now();
    let mut record = tokens("t");

    record.expires_in = Some(3600);
    assert!(!record.expires_within(Duration::from_secs(300), now));
    assert!(record.expires_within(Duration::from_secs(4000), now));

    record.expires_in = None;
    assert!(!record.expires_within(Duration::from_secs(4000), now));
}
