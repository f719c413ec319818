//! Market Data Adapters
//!
//! Spot price feed:
//! - `JupiterPriceClient`: Jupiter price API client for real-time prices
//!
//! Overview, history and volume live in the `birdeye` adapter.

mod jupiter_price;

pub use jupiter_price::{JupiterPriceClient, JUPITER_PRICE_API};
