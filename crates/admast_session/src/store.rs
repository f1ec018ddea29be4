//! Key-value store seam for sessions and tokens.

use crate::{SessionError, SessionErrorKind, SessionResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Durable key-value store with per-key TTL.
///
/// The manager treats the store as an opaque map, not a relational system:
/// get/set/delete by string key, with expiry handled store-side. The handle
/// is injected at construction, so tests substitute [`MemoryStore`] and
/// deployments plug in whatever backs their sessions.
///
/// Last-writer-wins per key is sufficient; the records are advisory session
/// metadata, not a ledger.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the value at `key`, if present and unexpired.
    async fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Write `value` at `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> SessionResult<()>;

    /// Remove `key` if present.
    async fn delete(&self, key: &str) -> SessionResult<()>;
}

#[derive(Debug, Clone)]
struct StoreEntry {
    value: String,
    expires_at: Instant,
}

impl StoreEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory [`SessionStore`] for tests and single-process deployments.
///
/// Expired entries are dropped lazily on lookup.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoreEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, counting ones not yet reaped.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let mut entries = self.entries.lock().unwrap();
        let expired = entries.get(key).is_some_and(StoreEntry::is_expired);
        if expired {
            debug!(key, "dropping expired entry");
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> SessionResult<()> {
        let expires_at = Instant::now().checked_add(ttl).ok_or_else(|| {
            SessionError::new(SessionErrorKind::Store(format!(
                "ttl overflow for key {key}"
            )))
        })?;
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), StoreEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> SessionResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
