//! Provider error taxonomy and HTTP-boundary classification.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Error payload inside the provider's JSON error envelope.
///
/// The provider wraps every failure as `{"error": {...}}` with a message,
/// a coarse type string, a numeric code, and an optional subcode refining it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderError {
    /// Human-readable message.
    pub message: Option<String>,
    /// Coarse error class, e.g. `OAuthException`.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Primary numeric error code.
    pub code: Option<i64>,
    /// Subcode refining the primary code.
    pub error_subcode: Option<i64>,
    /// Provider-side trace id for support escalation.
    pub fbtrace_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ProviderError,
}

/// Classified API error variants.
///
/// Authentication, permission, validation, and not-found failures are fatal:
/// retrying them cannot succeed without caller intervention. Rate-limit,
/// server, and network failures are transient and eligible for backoff.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ApiErrorKind {
    /// Credential expired, revoked, or invalid.
    #[display("Authentication failed: {_0}")]
    Authentication(String),
    /// Caller lacks permission for the target resource.
    #[display("Permission denied: {_0}")]
    Permission(String),
    /// The provider rejected the request parameters.
    #[display("Invalid request: {_0}")]
    Validation(String),
    /// Target object does not exist.
    #[display("Not found: {_0}")]
    NotFound(String),
    /// The provider throttled the call.
    #[display("Rate limited: {_0}")]
    RateLimited(String),
    /// Provider-side failure.
    #[display("Server error (status {status}): {message}")]
    Server { status: u16, message: String },
    /// Transport-level failure (unreachable host, timeout).
    #[display("Network error: {_0}")]
    Network(String),
    /// The provider returned a body this layer could not interpret.
    #[display("Unexpected response: {_0}")]
    Response(String),
}

/// Classified API error with provider diagnostics and source location.
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ApiErrorKind,
    code: Option<i64>,
    subcode: Option<i64>,
    trace_id: Option<String>,
    retry_after: Option<Duration>,
    line: u32,
    file: &'static str,
}

impl ApiError {
    /// Create a new error from a kind with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ApiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            code: None,
            subcode: None,
            trace_id: None,
            retry_after: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Fatal: the credential must be re-issued before the call can succeed.
    #[track_caller]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Authentication(message.into()))
    }

    /// Fatal: the caller is not allowed to touch the target resource.
    #[track_caller]
    pub fn permission(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Permission(message.into()))
    }

    /// Fatal: the request itself is malformed.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation(message.into()))
    }

    /// Fatal: the object does not exist.
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound(message.into()))
    }

    /// Retryable; `retry_after` is honored by the backoff schedule when set.
    #[track_caller]
    pub fn rate_limited(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        let mut err = Self::new(ApiErrorKind::RateLimited(message.into()));
        err.retry_after = retry_after;
        err
    }

    /// Retryable provider-side failure.
    #[track_caller]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Server {
            status,
            message: message.into(),
        })
    }

    /// Retryable transport failure.
    #[track_caller]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network(message.into()))
    }

    /// Fatal: the response body could not be interpreted.
    #[track_caller]
    pub fn response(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Response(message.into()))
    }

    /// Attach provider diagnostics from an error envelope.
    pub fn with_provider(
        mut self,
        code: Option<i64>,
        subcode: Option<i64>,
        trace_id: Option<String>,
    ) -> Self {
        self.code = code;
        self.subcode = subcode;
        self.trace_id = trace_id;
        self
    }

    /// Attach a wait hint for the backoff schedule.
    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    /// Get the classified kind.
    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    /// Provider error code, if the envelope carried one.
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    /// Provider error subcode, if the envelope carried one.
    pub fn subcode(&self) -> Option<i64> {
        self.subcode
    }

    /// Provider trace id, if the envelope carried one.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Suggested wait before another attempt, when the failure supplied one.
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Whether another attempt may succeed without caller intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::RateLimited(_) | ApiErrorKind::Server { .. } | ApiErrorKind::Network(_)
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API Error: {}", self.kind)?;
        if let Some(code) = self.code {
            write!(f, " (code {code}")?;
            if let Some(subcode) = self.subcode {
                write!(f, ", subcode {subcode}")?;
            }
            write!(f, ")")?;
        }
        if let Some(trace_id) = &self.trace_id {
            write!(f, " [trace {trace_id}]")?;
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}

impl std::error::Error for ApiError {}

/// Classify a non-success HTTP response from the provider.
///
/// Parses the JSON error envelope at most once; when no envelope is present
/// the HTTP status alone decides the classification. The body is never
/// re-parsed downstream.
///
/// Code 190 (with subcode 463 for an expired token) is the provider's
/// credential-failure signal; codes 4, 17, 32, 613, and the 80000 range are
/// its throttling signals.
#[track_caller]
pub fn classify_response(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => classify_provider_error(status, envelope.error),
        Err(_) => ApiError::new(kind_from_status(status, truncate(body))),
    }
}

#[track_caller]
fn classify_provider_error(status: u16, error: ProviderError) -> ApiError {
    let message = error
        .message
        .unwrap_or_else(|| format!("provider returned status {status}"));
    let code = error.code;
    let subcode = error.error_subcode;

    let kind = match code {
        Some(190) | Some(102) => {
            if subcode == Some(463) {
                ApiErrorKind::Authentication(format!("access token expired: {message}"))
            } else {
                ApiErrorKind::Authentication(message)
            }
        }
        Some(10) => ApiErrorKind::Permission(message),
        Some(c) if (200..=299).contains(&c) => ApiErrorKind::Permission(message),
        Some(4) | Some(17) | Some(32) | Some(613) => ApiErrorKind::RateLimited(message),
        Some(c) if (80000..=80014).contains(&c) => ApiErrorKind::RateLimited(message),
        Some(803) => ApiErrorKind::NotFound(message),
        Some(100) if subcode == Some(33) => ApiErrorKind::NotFound(message),
        Some(100) => ApiErrorKind::Validation(message),
        Some(1) | Some(2) => ApiErrorKind::Server { status, message },
        _ if error.error_type.as_deref() == Some("OAuthException") => {
            ApiErrorKind::Authentication(message)
        }
        _ => kind_from_status(status, message),
    };

    ApiError::new(kind).with_provider(code, subcode, error.fbtrace_id)
}

fn kind_from_status(status: u16, message: String) -> ApiErrorKind {
    match status {
        401 => ApiErrorKind::Authentication(message),
        403 => ApiErrorKind::Permission(message),
        404 => ApiErrorKind::NotFound(message),
        429 => ApiErrorKind::RateLimited(message),
        400 => ApiErrorKind::Validation(message),
        s if s >= 500 => ApiErrorKind::Server { status: s, message },
        _ => ApiErrorKind::Response(message),
    }
}

fn truncate(body: &str) -> String {
    const LIMIT: usize = 300;
    if body.len() <= LIMIT {
        body.to_string()
    } else {
        let mut end = LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &body[..end])
    }
}
