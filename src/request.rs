//! Endpoint request assembly.

/// A validated request ready to be serialized into a URL.
///
/// Parameters keep their insertion order. The service does not care about
/// ordering, but stable output keeps built URLs reproducible.
#[derive(Debug, Clone)]
pub struct EndpointRequest {
    method_path: String,
    params: Vec<(String, String)>,
}

impl EndpointRequest {
    pub fn new(method_path: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            method_path: method_path.into(),
            params,
        }
    }

    pub fn method_path(&self) -> &str {
        &self.method_path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Appends a parameter after the ones set at construction.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Serializes the parameters to a percent-encoded query string.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
