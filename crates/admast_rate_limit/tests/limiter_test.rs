//! Behavioral tests for the admission gate.

use admast_rate_limit::{AccessTier, CallKind, RateLimiter};

#[test]
fn development_tier_scenario() {
    let limiter = RateLimiter::new(AccessTier::Development);

    // 58 reads, then a 59th: all admitted.
    for n in 0..59 {
        assert!(
            limiter.check("act_1", CallKind::Read).is_ok(),
            "read {n} should be admitted"
        );
    }
    let (score, _) = limiter.usage("act_1").unwrap();
    assert_eq!(score, 59);

    // A write (weight 3) would take the score to 62 > 60.
    let err = limiter.check("act_1", CallKind::Write).unwrap_err();
    assert_eq!(err.account_id(), "act_1");

    // The rejected write left the score untouched; one more read still fits.
    assert!(limiter.check("act_1", CallKind::Read).is_ok());
    let (score, _) = limiter.usage("act_1").unwrap();
    assert_eq!(score, 60);

    // Now the budget is exactly spent.
    assert!(limiter.check("act_1", CallKind::Read).is_err());
}

#[test]
fn admission_is_exact_at_the_budget_boundary() {
    let limiter = RateLimiter::new(AccessTier::Development);

    for _ in 0..20 {
        limiter.check("act_2", CallKind::Write).unwrap();
    }
    let (score, _) = limiter.usage("act_2").unwrap();
    assert_eq!(score, 60);
    assert!(limiter.check("act_2", CallKind::Read).is_err());
}

#[test]
fn accounts_have_independent_windows() {
    let limiter = RateLimiter::new(AccessTier::Development);

    for _ in 0..60 {
        limiter.check("act_busy", CallKind::Read).unwrap();
    }
    assert!(limiter.check("act_busy", CallKind::Read).is_err());
    assert!(limiter.check("act_idle", CallKind::Read).is_ok());
}

#[test]
fn standard_tier_takes_heavier_load() {
    let limiter = RateLimiter::new(AccessTier::Standard);

    for _ in 0..3000 {
        limiter.check("act_1", CallKind::Write).unwrap();
    }
    assert!(limiter.check("act_1", CallKind::Read).is_err());
}

#[test]
fn unknown_account_has_no_usage() {
    let limiter = RateLimiter::new(AccessTier::Development);
    assert!(limiter.usage("act_unseen").is_none());
}

#[test]
fn call_weights() {
    assert_eq!(CallKind::Read.weight(), 1);
    assert_eq!(CallKind::Write.weight(), 3);
    assert!(CallKind::Write.is_write());
    assert!(!CallKind::Read.is_write());
}
