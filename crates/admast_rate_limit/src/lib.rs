//! Per-tenant admission control for the provider's weighted call budget.
//!
//! The provider scores calls rather than counting them: reads cost 1, writes
//! cost 3, and each advertiser account may spend a tier-dependent budget per
//! rolling window. [`RateLimiter`] is the in-process gate enforcing that
//! model: a pure admission check invoked immediately before dispatch, with
//! no network or persistent I/O of its own.
//!
//! The limiter is an explicitly-owned component: construct one at the
//! composition root and inject it into the orchestrator. Tests build
//! isolated instances, so no state leaks across them.

mod error;
mod limiter;
mod tier;
mod window;

pub use error::{RateLimitError, RateLimitErrorKind};
pub use limiter::{CallKind, RateLimiter};
pub use tier::AccessTier;
pub use window::UsageWindow;
