//! Tests for access tiers.

use admast_rate_limit::AccessTier;
use std::str::FromStr;
use std::time::Duration;

#[test]
fn development_tier() {
    let tier = AccessTier::Development;
    assert_eq!(tier.budget(), 60);
    assert_eq!(tier.window(), Duration::from_secs(300));
    assert_eq!(tier.block_duration(), Duration::from_secs(300));
}

#[test]
fn standard_tier() {
    let tier = AccessTier::Standard;
    assert_eq!(tier.budget(), 9000);
    assert_eq!(tier.window(), Duration::from_secs(300));
    assert_eq!(tier.block_duration(), Duration::from_secs(60));
}

#[test]
fn tier_names_round_trip() {
    assert_eq!(
        AccessTier::from_str("development").unwrap(),
        AccessTier::Development
    );
    assert_eq!(
        AccessTier::from_str("standard").unwrap(),
        AccessTier::Standard
    );
    assert_eq!(AccessTier::Development.to_string(), "development");
    assert!(AccessTier::from_str("platinum").is_err());
}
