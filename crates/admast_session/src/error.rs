//! Session lifecycle error types.

use admast_error::ApiError;
use derive_getters::Getters;

/// Session error variants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionErrorKind {
    /// The session/token store failed or is unreachable.
    #[display("Store error: {_0}")]
    Store(String),

    /// A stored record could not be serialized or deserialized.
    #[display("Serialization error: {_0}")]
    Serialization(String),

    /// The session signing key is missing or unusable.
    #[display("Signing error: {_0}")]
    Signing(String),
}

/// Session error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    kind: SessionErrorKind,
    line: u32,
    file: &'static str,
}

impl SessionError {
    /// Create a new SessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// Store trouble looks like any other infrastructure outage to a caller mid
// request: transient, worth another attempt. Signing trouble means no valid
// credential can exist for the call.
impl From<SessionError> for ApiError {
    #[track_caller]
    fn from(err: SessionError) -> Self {
        match err.kind() {
            SessionErrorKind::Store(_) | SessionErrorKind::Serialization(_) => {
                ApiError::network(format!("session store failure: {err}"))
            }
            SessionErrorKind::Signing(_) => {
                ApiError::authentication(format!("session signing failure: {err}"))
            }
        }
    }
}
