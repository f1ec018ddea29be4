//! Parameter encoding for the provider wire format.

use serde_json::Value;
use std::collections::HashMap;

/// Encode parameters for the query string or form body.
///
/// The provider's convention: arrays and objects are embedded as JSON
/// strings, scalars are stringified directly, nulls are dropped. Keys are
/// emitted in sorted order so encoded requests are deterministic.
pub(crate) fn encode_params(params: &HashMap<String, Value>) -> Vec<(String, String)> {
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();
    keys.into_iter()
        .filter_map(|key| encode_value(&params[key]).map(|value| (key.clone(), value)))
        .collect()
}

fn encode_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_stringify_directly() {
        let mut params = HashMap::new();
        params.insert("limit".to_string(), json!(25));
        params.insert("name".to_string(), json!("Spring Sale"));
        params.insert("is_autobid".to_string(), json!(true));

        let encoded = encode_params(&params);
        assert_eq!(
            encoded,
            vec![
                ("is_autobid".to_string(), "true".to_string()),
                ("limit".to_string(), "25".to_string()),
                ("name".to_string(), "Spring Sale".to_string()),
            ]
        );
    }

    #[test]
    fn compound_values_embed_as_json() {
        let mut params = HashMap::new();
        params.insert("fields".to_string(), json!(["id", "name", "status"]));
        params.insert("targeting".to_string(), json!({"geo": "US"}));

        let encoded = encode_params(&params);
        assert_eq!(encoded[0].1, r#"["id","name","status"]"#);
        assert_eq!(encoded[1].1, r#"{"geo":"US"}"#);
    }

    #[test]
    fn nulls_are_dropped() {
        let mut params = HashMap::new();
        params.insert("after".to_string(), Value::Null);
        assert!(encode_params(&params).is_empty());
    }
}
