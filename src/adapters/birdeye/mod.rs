//! Birdeye Adapter
//!
//! Token overview, price history and price/volume from the Birdeye public API.
//! All three require an API key; without one the client answers "no data"
//! without touching the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use labs_ticker::adapters::birdeye::{BirdeyeClient, BirdeyeConfig};
//! use labs_ticker::adapters::http::ReqwestTransport;
//!
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let birdeye = BirdeyeClient::new(transport, BirdeyeConfig::with_api_key("my-key"));
//! let overview = birdeye.get_token_overview(&token).await?;
//! ```

mod client;
mod history;
mod overview;
mod types;
mod volume;

pub use client::{BirdeyeClient, BirdeyeConfig, BIRDEYE_API_URL};
