//! Advertiser account id handling.

/// Prefix the provider puts on advertiser account ids.
pub const ACCOUNT_ID_PREFIX: &str = "act_";

/// Normalize a raw account id to the provider's `act_` form.
///
/// Callers pass account ids both bare (`"123"`) and prefixed (`"act_123"`);
/// the provider only accepts the latter.
pub fn normalize_account_id(raw: &str) -> String {
    if raw.starts_with(ACCOUNT_ID_PREFIX) {
        raw.to_string()
    } else {
        format!("{ACCOUNT_ID_PREFIX}{raw}")
    }
}

/// Resolve the tenant account for a call.
///
/// An explicit account id wins; otherwise an `act_`-prefixed object id
/// identifies the account. `None` means the call is not account-scoped and
/// will not be admission-checked.
pub fn resolve_account_id(explicit: Option<&str>, object_id: Option<&str>) -> Option<String> {
    if let Some(id) = explicit {
        return Some(normalize_account_id(id));
    }
    object_id
        .filter(|id| id.starts_with(ACCOUNT_ID_PREFIX))
        .map(str::to_string)
}
