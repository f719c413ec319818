use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failure of one HTTP call
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Invalid JSON body: {0}")]
    Decode(String),
}

/// A single JSON GET request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, key: &str, value: impl ToString) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Query parameter value by key
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Port for fetching JSON documents over HTTP
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one GET request. Non-2xx statuses are errors.
    async fn get_json(&self, request: HttpRequest) -> Result<Value, TransportError>;
}
