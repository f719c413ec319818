//! Market data provider ports
//!
//! Every provider call is total: it yields a value or `None` (no data).
//! Failures are logged by the adapter and never propagated to the caller.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{PricePoint, TokenAddress, TokenOverview, VolumeStats, VolumeWindow};
use super::http::TransportError;

/// Why a provider call produced no data. Logged, never returned past the adapter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("Provider credential is not configured")]
    MissingCredential,

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Non-success HTTP status: {0}")]
    Status(u16),

    #[error("Provider reported failure")]
    Unsuccessful,

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) => ProviderError::Transport(msg),
            TransportError::Status(code) => ProviderError::Status(code),
            TransportError::Decode(msg) => ProviderError::Malformed(msg),
        }
    }
}

/// Current spot price of a token
#[async_trait]
pub trait SpotPricePort: Send + Sync {
    async fn spot_price(&self, token: &TokenAddress) -> Option<f64>;
}

/// Market cap, liquidity, holders and 24h change
#[async_trait]
pub trait TokenOverviewPort: Send + Sync {
    async fn overview(&self, token: &TokenAddress) -> Option<TokenOverview>;
}

/// Time-ordered price samples between two unix timestamps (seconds)
#[async_trait]
pub trait PriceHistoryPort: Send + Sync {
    async fn price_history(&self, token: &TokenAddress, from: i64, to: i64) -> Option<Vec<PricePoint>>;
}

/// Price and volume over one trading window
#[async_trait]
pub trait PriceVolumePort: Send + Sync {
    async fn price_volume(&self, token: &TokenAddress, window: VolumeWindow) -> Option<VolumeStats>;
}
