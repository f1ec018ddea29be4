//! API client orchestrator for the admast access layer.
//!
//! [`ApiClient`] composes the leaf components into the path every logical
//! operation takes: resolve the caller's provider credentials through the
//! session manager, admission-check the tenant budget, execute the HTTP call
//! inside the retry engine, and, for list operations, normalize the
//! provider's paging envelope. Tool handlers sit entirely above this crate
//! and see only request values in, payloads or classified errors out.

mod client;
mod config;
mod params;
mod request;

pub use client::{ApiClient, DEFAULT_BATCH_SIZE};
pub use config::ApiConfig;
pub use request::ApiRequest;
