//! CLI Commands
//!
//! Argument definitions for the labs-ticker binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Labs Ticker - token price aggregation and rotating price status
#[derive(Parser, Debug)]
#[command(
    name = "labs-ticker",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Token price ticker for Solana tokens",
    long_about = "Aggregates Jupiter and Birdeye market data into metrics snapshots \
                  and keeps a rotating live-price status up to date."
)]
pub struct TickerApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the rotating status loop until Ctrl+C
    Run(RunCmd),

    /// Fetch and print a full metrics snapshot for a token
    Snapshot(SnapshotCmd),

    /// Fetch and print the spot price of a token
    Price(PriceCmd),
}

/// Run the status loop
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/ticker.toml")]
    pub config: PathBuf,

    /// Override the rotation interval in seconds
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

/// Full metrics snapshot
#[derive(Parser, Debug)]
pub struct SnapshotCmd {
    /// Token symbol (e.g., LABS)
    #[arg(value_name = "SYMBOL", default_value = "LABS")]
    pub symbol: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/ticker.toml")]
    pub config: PathBuf,

    /// Label shown in the output (defaults to the symbol)
    #[arg(long, value_name = "NAME")]
    pub label: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text")]
    pub format: String,
}

/// Spot price only
#[derive(Parser, Debug)]
pub struct PriceCmd {
    /// Token symbol (e.g., SOL)
    #[arg(value_name = "SYMBOL", default_value = "LABS")]
    pub symbol: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/ticker.toml")]
    pub config: PathBuf,
}
