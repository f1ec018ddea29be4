//! Top-level error wrapper types.

use crate::{ApiError, ConfigError, JsonError};

/// Workspace-level error kinds.
///
/// Crate-local errors (admission, session lifecycle) stay in their own
/// crates and convert into [`ApiError`] at the orchestrator boundary; the
/// kinds here are the ones that surface from composition and configuration.
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AdmastErrorKind {
    /// Classified provider API error
    #[from(ApiError)]
    Api(ApiError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Admast error with kind discrimination.
///
/// # Examples
///
/// ```
/// use admast_error::{AdmastResult, ConfigError};
///
/// fn might_fail() -> AdmastResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Admast Error: {}", _0)]
pub struct AdmastError(Box<AdmastErrorKind>);

impl AdmastError {
    /// Create a new error from a kind.
    pub fn new(kind: AdmastErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AdmastErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AdmastErrorKind
impl<T> From<T> for AdmastError
where
    T: Into<AdmastErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for admast operations.
pub type AdmastResult<T> = std::result::Result<T, AdmastError>;
