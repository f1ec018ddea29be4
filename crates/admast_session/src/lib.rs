//! Session and provider-token lifecycle management.
//!
//! This crate owns every credential in the system. A [`UserSession`] is the
//! access layer's own short-lived login record; a [`UserTokens`] record holds
//! the longer-lived provider OAuth credentials that session unlocks. Both
//! live in an injected [`SessionStore`] under keys derived strictly from the
//! user id; no global credential state exists, so concurrent requests for
//! different users can never observe each other's tokens.
//!
//! The [`SessionManager`] is independent of the orchestrator: it issues and
//! verifies signed session tokens, persists records under their TTLs, and
//! runs the OAuth code-exchange and refresh flows against the provider token
//! endpoint. Those flows are network calls and go through the same retry
//! engine and error classification as ordinary API calls.

mod error;
mod manager;
mod oauth;
mod records;
mod store;
mod token;

pub use error::{SessionError, SessionErrorKind, SessionResult};
pub use manager::{SessionConfig, SessionManager};
pub use records::{UserAuth, UserSession, UserTokens};
pub use store::{MemoryStore, SessionStore};
