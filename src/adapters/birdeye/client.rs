//! Birdeye API Client
//!
//! Shared request plumbing for the Birdeye public API: credential gate,
//! chain header, and the `{ success, data }` envelope check.

use std::sync::Arc;
use serde::de::DeserializeOwned;

use crate::ports::http::{HttpRequest, HttpTransport};
use crate::ports::market_data::ProviderError;
use super::types::Envelope;

pub const BIRDEYE_API_URL: &str = "https://public-api.birdeye.so";

/// Configuration for the BirdeyeClient
#[derive(Debug, Clone)]
pub struct BirdeyeConfig {
    /// API base URL
    pub base_url: String,
    /// API key; every Birdeye endpoint requires one
    pub api_key: Option<String>,
    /// Value of the `x-chain` header
    pub chain: String,
    /// Candle type for price history ("1H", "1D", ...)
    pub history_resolution: String,
}

impl Default for BirdeyeConfig {
    fn default() -> Self {
        Self {
            base_url: BIRDEYE_API_URL.to_string(),
            api_key: None,
            chain: "solana".to_string(),
            history_resolution: "1H".to_string(),
        }
    }
}

impl BirdeyeConfig {
    /// Create config with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }
}

/// Birdeye client implementing the overview, history and volume ports
#[derive(Clone)]
pub struct BirdeyeClient {
    pub(super) config: BirdeyeConfig,
    transport: Arc<dyn HttpTransport>,
}

impl BirdeyeClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: BirdeyeConfig) -> Self {
        Self { config, transport }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// GET `path` and decode the `data` member of the envelope.
    /// Without a credential this returns before any I/O.
    pub(super) async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let api_key = self.api_key().ok_or(ProviderError::MissingCredential)?;

        let mut request = HttpRequest::get(format!("{}{}", self.config.base_url, path))
            .header("X-API-KEY", api_key)
            .header("x-chain", &self.config.chain)
            .header("accept", "application/json");
        for (key, value) in query {
            request = request.query(key, value);
        }

        let body = self.transport.get_json(request).await?;
        let envelope: Envelope = serde_json::from_value(body)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if !envelope.success {
            return Err(ProviderError::Unsuccessful);
        }

        let data = envelope
            .data
            .ok_or_else(|| ProviderError::Malformed("missing data".to_string()))?;
        serde_json::from_value(data).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

/// Convert a provider result into the absence value, logging why it failed
pub(super) fn absent_on_error<T>(what: &str, token: &str, result: Result<T, ProviderError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ProviderError::MissingCredential) => {
            tracing::debug!("Skipping Birdeye {} for {}: no API key", what, token);
            None
        }
        Err(e) => {
            tracing::warn!("Birdeye {} unavailable for {}: {}", what, token, e);
            None
        }
    }
}
