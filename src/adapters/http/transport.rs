//! Reqwest-backed JSON transport
//!
//! One GET per call, no retries. Non-2xx statuses surface as `TransportError::Status`.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::ports::http::{HttpRequest, HttpTransport, TransportError};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Create a transport with a 10 second request timeout
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let mut req = self.http.get(&request.url).query(&request.query);
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} returned {}", request.url, status);
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
