//! CLI Adapter
//!
//! Command-line interface for the labs-ticker binary.
//! Uses clap derive macros for argument parsing.

mod commands;
pub mod render;

pub use commands::{TickerApp, Command, RunCmd, SnapshotCmd, PriceCmd};
pub use render::{render_outcome, render_snapshot, usd_value, DEGRADED_MESSAGE};
