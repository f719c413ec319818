//! Labs Ticker - Token price aggregation library
//!
//! Pulls spot price, overview, history and volume for Solana tokens from
//! Jupiter and Birdeye, reconciles partial results into one metrics snapshot,
//! and drives a rotating live-price status.
//!
//! # Modules
//!
//! - `domain`: Core types (TokenAddress, MetricsSnapshot, HistoricalChange, Rotation)
//! - `ports`: Trait abstractions (provider ports, HttpTransport, PresentationTarget)
//! - `adapters`: External implementations (Jupiter, Birdeye, reqwest, console, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: MetricsAggregator and StatusScheduler

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
