//! Cursor pagination envelope handling.
//!
//! The provider wraps every list response as `{"data": [...], "paging":
//! {"cursors": {"before": ..., "after": ...}}}`. [`Page::from_value`] is the
//! pure transformation of that envelope into a uniform traversal contract:
//! callers wanting the next page re-invoke the orchestrator with the returned
//! `cursor_after` as an explicit parameter. The walker never fetches on its
//! own, so each page load stays a single deterministic operation.

use admast_error::JsonError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Cursor pair inside the provider's paging object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagingCursors {
    /// Opaque token for the preceding page.
    pub before: Option<String>,
    /// Opaque token for the following page.
    pub after: Option<String>,
}

/// Raw paging sub-object of a list envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    /// Cursor pair; absent on single-page responses.
    #[serde(default)]
    pub cursors: Option<PagingCursors>,
    /// Prebuilt next-page URL. Unused: traversal goes through cursors.
    pub next: Option<String>,
    /// Prebuilt previous-page URL. Unused: traversal goes through cursors.
    pub previous: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RawEnvelope<T> {
    #[serde(default)]
    data: Vec<T>,
    #[serde(default)]
    paging: Option<Paging>,
}

/// One page of a listed resource.
///
/// `has_next_page` is true exactly when `cursor_after` is present and
/// non-empty; a cursor does not guarantee the next page holds any rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Rows in the provider's order.
    pub data: Vec<T>,
    /// Cursor for the preceding page.
    pub cursor_before: Option<String>,
    /// Cursor for the following page.
    pub cursor_after: Option<String>,
    /// Whether a following page can be requested.
    pub has_next_page: bool,
    /// Whether a preceding page can be requested.
    pub has_previous_page: bool,
}

impl<T: DeserializeOwned> Page<T> {
    /// Parse a raw provider list envelope.
    ///
    /// Row order is preserved as-is (the provider's order is authoritative).
    /// A missing `paging` object means a single-page response: both cursors
    /// absent, both flags false. Empty-string cursors count as absent.
    pub fn from_value(envelope: Value) -> Result<Self, JsonError> {
        let raw: RawEnvelope<T> = serde_json::from_value(envelope)
            .map_err(|e| JsonError::new(format!("failed to parse list envelope: {e}")))?;
        let (before, after) = raw
            .paging
            .and_then(|paging| paging.cursors)
            .map(|cursors| (cursors.before, cursors.after))
            .unwrap_or((None, None));
        let cursor_before = non_empty(before);
        let cursor_after = non_empty(after);
        Ok(Self {
            data: raw.data,
            has_next_page: cursor_after.is_some(),
            has_previous_page: cursor_before.is_some(),
            cursor_before,
            cursor_after,
        })
    }
}

fn non_empty(cursor: Option<String>) -> Option<String> {
    cursor.filter(|c| !c.is_empty())
}
