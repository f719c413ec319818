//! Domain Layer - Core types for the token price ticker
//!
//! This module contains pure domain types and logic with no external dependencies.
//! All external interactions happen through the ports layer.
//!
//! - `token`: Token addresses and the known-token registry
//! - `snapshot`: Aggregated metrics snapshot and its outcome
//! - `change`: Historical price change against the nearest sample
//! - `rotation`: Wrapping rotation of status display entries

pub mod token;
pub mod snapshot;
pub mod change;
pub mod rotation;

pub use token::{TokenAddress, KnownToken, TokenRegistry, Resolved, TokenError};
pub use snapshot::{
    MetricsSnapshot, SnapshotOutcome, TokenOverview, VolumeStats, VolumeWindow, cross_ratio,
};
pub use change::{HistoricalChange, PricePoint, nearest_sample, percent_change};
pub use rotation::{Rotation, RotationError};
