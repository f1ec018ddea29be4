//! Error types for the admast advertising API access layer.
//!
//! The central type is [`ApiError`]: every failure observed at the HTTP
//! boundary is classified exactly once by [`classify_response`], which parses
//! the provider's JSON error envelope and produces a typed error value.
//! Downstream components branch on [`ApiError::is_retryable`] instead of
//! re-parsing stringified errors.
//!
//! Provider diagnostics (`code`, `error_subcode`, `fbtrace_id`) are preserved
//! on the error value and rendered by its `Display` implementation so callers
//! can key remediation logic off them.

mod api;
mod config;
mod error;
mod json;

pub use api::{ApiError, ApiErrorKind, ProviderError, classify_response};
pub use config::ConfigError;
pub use error::{AdmastError, AdmastErrorKind, AdmastResult};
pub use json::JsonError;
