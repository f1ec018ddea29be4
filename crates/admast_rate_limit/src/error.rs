//! Error types for admission control.

use admast_error::ApiError;
use std::fmt;
use std::time::Duration;

/// Error kinds raised by the admission gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitErrorKind {
    /// Tenant budget exhausted for the current window.
    LimitExceeded {
        /// Account whose budget ran out.
        account_id: String,
        /// Remaining window time before the score resets.
        retry_after: Duration,
    },
}

impl fmt::Display for RateLimitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateLimitErrorKind::LimitExceeded {
                account_id,
                retry_after,
            } => write!(
                f,
                "budget exhausted for {account_id}, retry after {}s",
                retry_after.as_secs()
            ),
        }
    }
}

/// Admission error with location tracking.
#[derive(Debug, Clone)]
pub struct RateLimitError {
    kind: RateLimitErrorKind,
    line: u32,
    file: &'static str,
}

impl RateLimitError {
    /// Create a new admission error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RateLimitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RateLimitErrorKind {
        &self.kind
    }

    /// Account whose budget the rejection concerns.
    pub fn account_id(&self) -> &str {
        let RateLimitErrorKind::LimitExceeded { account_id, .. } = &self.kind;
        account_id
    }

    /// Suggested wait before retrying the admission check.
    pub fn retry_after(&self) -> Duration {
        let RateLimitErrorKind::LimitExceeded { retry_after, .. } = &self.kind;
        *retry_after
    }
}

impl fmt::Display for RateLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rate Limit Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for RateLimitError {}

impl From<RateLimitError> for ApiError {
    #[track_caller]
    fn from(err: RateLimitError) -> Self {
        let retry_after = err.retry_after();
        ApiError::rate_limited(
            format!("tenant {} exhausted its request budget", err.account_id()),
            Some(retry_after),
        )
    }
}
