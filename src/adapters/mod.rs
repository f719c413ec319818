//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - HTTP: reqwest JSON transport shared by provider clients
//! - Market Data: Jupiter spot price feed
//! - Birdeye: token overview, price history and price/volume
//! - Presentation: console status targets
//! - CLI: Command-line interface and snapshot rendering

pub mod http;
pub mod market_data;
pub mod birdeye;
pub mod presentation;
pub mod cli;

pub use http::ReqwestTransport;
pub use market_data::JupiterPriceClient;
pub use birdeye::{BirdeyeClient, BirdeyeConfig};
pub use presentation::{ConsoleHost, ConsoleTarget};
pub use cli::TickerApp;
