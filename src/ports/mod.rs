//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Market data providers (spot price, overview, history, volume)
//! - The JSON HTTP transport used by provider clients
//! - Presentation targets that display the live price

pub mod market_data;
pub mod http;
pub mod presentation;
pub mod mocks;

// Re-export main traits and types
pub use market_data::{
    ProviderError, SpotPricePort, TokenOverviewPort, PriceHistoryPort, PriceVolumePort,
};
pub use http::{HttpRequest, HttpTransport, TransportError};
pub use presentation::{PresentationError, PresentationHost, PresentationTarget};
