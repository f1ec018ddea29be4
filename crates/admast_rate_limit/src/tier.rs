//! Provider access tiers and their budgets.

use std::time::Duration;

/// Provider access tiers.
///
/// Tier assignment is static configuration; the provider does not advertise
/// it on responses, so deployments declare which tier their application was
/// granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AccessTier {
    /// Pre-review applications: budget 60 per window, 5-minute block on exceed.
    Development,
    /// Reviewed applications: budget 9000 per window, 1-minute block on exceed.
    Standard,
}

impl AccessTier {
    /// Maximum usage score one account may spend per window.
    pub fn budget(&self) -> u32 {
        match self {
            AccessTier::Development => 60,
            AccessTier::Standard => 9000,
        }
    }

    /// Length of the rolling window the score accumulates over.
    pub fn window(&self) -> Duration {
        Duration::from_secs(300)
    }

    /// Penalty the provider applies once its own accounting trips.
    ///
    /// Used as the fallback wait hint when a throttling response carries no
    /// retry-after of its own.
    pub fn block_duration(&self) -> Duration {
        match self {
            AccessTier::Development => Duration::from_secs(300),
            AccessTier::Standard => Duration::from_secs(60),
        }
    }
}
