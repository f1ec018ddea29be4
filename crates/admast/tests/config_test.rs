//! Tests for layered configuration loading.

use admast::{AccessTier, AdmastConfig};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const FULL_CONFIG: &str = r#"
[provider]
base_url = "https://graph.facebook.com"
api_version = "v19.0"
timeout_secs = 10

[rate_limit]
tier = "standard"

[retry]
max_retries = 5
base_delay_ms = 250
max_delay_secs = 20

[session]
token_endpoint = "https://graph.facebook.com/v19.0/oauth/access_token"
client_id = "app-123"
redirect_uri = "https://app.test/callback"
"#;

#[test]
fn full_config_parses() {
    let file = write_config(FULL_CONFIG);
    let config = AdmastConfig::from_file(file.path()).unwrap();

    assert_eq!(config.tier().unwrap(), AccessTier::Standard);
    assert_eq!(config.retry.max_retries, 5);
    assert_eq!(config.retry.base_delay_ms, 250);

    let api = config.api_config();
    assert_eq!(api.api_version, "v19.0");
    assert_eq!(api.timeout, Duration::from_secs(10));

    // Lifecycle fields fall back to their defaults when omitted.
    assert_eq!(config.session.session_ttl_secs, 7 * 24 * 60 * 60);
    assert_eq!(config.session.token_ttl_secs, 60 * 24 * 60 * 60);
}

#[test]
fn retry_section_is_optional() {
    let trimmed = FULL_CONFIG.replace(
        r#"[retry]
max_retries = 5
base_delay_ms = 250
max_delay_secs = 20
"#,
        "",
    );
    let file = write_config(&trimmed);
    let config = AdmastConfig::from_file(file.path()).unwrap();
    assert_eq!(config.retry.max_retries, 3);
}

#[test]
fn unknown_tier_is_rejected() {
    let broken = FULL_CONFIG.replace("standard", "platinum");
    let file = write_config(&broken);
    let config = AdmastConfig::from_file(file.path()).unwrap();
    assert!(config.tier().is_err());
}

#[test]
fn missing_sections_fail_to_parse() {
    let file = write_config("[provider]\nbase_url = \"https://graph.facebook.com\"\n");
    assert!(AdmastConfig::from_file(file.path()).is_err());
}
