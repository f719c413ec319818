use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::TokenAddress;
use crate::ports::http::{HttpRequest, HttpTransport};
use crate::ports::market_data::{ProviderError, SpotPricePort};

pub const JUPITER_PRICE_API: &str = "https://lite-api.jup.ag/price/v2";

/// Jupiter price API client (spot price in USD)
#[derive(Clone)]
pub struct JupiterPriceClient {
    transport: Arc<dyn HttpTransport>,
    price_url: String,
}

impl JupiterPriceClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_url(transport, JUPITER_PRICE_API)
    }

    pub fn with_url(transport: Arc<dyn HttpTransport>, price_url: impl Into<String>) -> Self {
        Self {
            transport,
            price_url: price_url.into(),
        }
    }

    /// Get price for a single token
    pub async fn get_price(&self, mint: &TokenAddress) -> Result<f64, ProviderError> {
        let request = HttpRequest::get(&self.price_url).query("ids", mint);
        let body = self.transport.get_json(request).await?;

        let response: PriceResponse = serde_json::from_value(body)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let entry = response
            .data
            .get(mint.as_str())
            .and_then(|entry| entry.as_ref())
            .ok_or_else(|| ProviderError::Malformed(format!("no price entry for {}", mint)))?;

        entry
            .price
            .as_ref()
            .and_then(parse_price)
            .ok_or_else(|| ProviderError::Malformed(format!("missing or invalid price for {}", mint)))
    }
}

#[async_trait]
impl SpotPricePort for JupiterPriceClient {
    async fn spot_price(&self, token: &TokenAddress) -> Option<f64> {
        match self.get_price(token).await {
            Ok(price) => Some(price),
            Err(e) => {
                tracing::warn!("Jupiter price unavailable for {}: {}", token, e);
                None
            }
        }
    }
}

/// v2 returns prices as strings, older versions as numbers
fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    (price.is_finite() && price >= 0.0).then_some(price)
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    #[serde(default)]
    data: std::collections::HashMap<String, Option<PriceData>>,
}

#[derive(Debug, Deserialize)]
struct PriceData {
    #[serde(default)]
    price: Option<Value>,
}
