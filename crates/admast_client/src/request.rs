//! Logical API requests.

use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;

/// One logical provider operation.
///
/// Built by the tool layer and handed to
/// [`ApiClient`](crate::ApiClient) as a value; the orchestrator decides how
/// parameters travel (query string for GET/DELETE, form body for POST).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    account_id: Option<String>,
    params: HashMap<String, Value>,
}

impl ApiRequest {
    /// Build a request for an arbitrary verb.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            account_id: None,
            params: HashMap::new(),
        }
    }

    /// Build a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Build a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Build a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a parameter.
    ///
    /// Arrays and objects are embedded as JSON strings at encode time;
    /// scalars are stringified directly.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Pin the tenant account this call spends budget against.
    ///
    /// Without this, the account is derived from an `act_`-prefixed leading
    /// path segment when one is present.
    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Label for retry and telemetry logs, e.g. `GET /act_1/campaigns`.
    pub fn label(&self) -> String {
        format!("{} /{}", self.method, self.path.trim_start_matches('/'))
    }

    pub(crate) fn method(&self) -> &Method {
        &self.method
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    pub(crate) fn params(&self) -> &HashMap<String, Value> {
        &self.params
    }

    /// Leading path segment, used to derive the tenant on object-id calls.
    pub(crate) fn leading_object_id(&self) -> Option<&str> {
        self.path
            .trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}
