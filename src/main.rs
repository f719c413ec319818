//! Labs Ticker - token price aggregation and rotating price status
//!
//! Binary entry point: wires config, provider clients and the scheduler.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use labs_ticker::adapters::cli::{
    render_outcome, Command, PriceCmd, RunCmd, SnapshotCmd, TickerApp,
};
use labs_ticker::adapters::{BirdeyeClient, ConsoleHost, JupiterPriceClient, ReqwestTransport};
use labs_ticker::application::{MetricsAggregator, Providers, StatusScheduler};
use labs_ticker::config::{load_config, Config};
use labs_ticker::domain::SnapshotOutcome;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (BIRDEYE_API_KEY goes here, not in the config file)
    dotenvy::dotenv().ok();

    let app = TickerApp::parse();

    match app.command {
        Command::Run(cmd) => run_command(cmd, app.verbose, app.debug).await,
        Command::Snapshot(cmd) => snapshot_command(cmd, app.verbose, app.debug).await,
        Command::Price(cmd) => price_command(cmd, app.verbose, app.debug).await,
    }
}

fn init_logging(verbose: bool, debug: bool, config_level: &str) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

/// Load config (tilde-expanded path), then start logging at the configured level
fn load(path: &std::path::Path, verbose: bool, debug: bool) -> Result<Config> {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
    let config = load_config(&expanded)
        .with_context(|| format!("Failed to load configuration from '{}'", expanded))?;
    init_logging(verbose, debug, &config.logging.level);
    Ok(config)
}

fn build_aggregator(config: &Config) -> Result<MetricsAggregator> {
    let transport = Arc::new(
        ReqwestTransport::with_timeout(config.providers.timeout())
            .context("Failed to create HTTP client")?,
    );

    let birdeye_config = config.providers.birdeye_config();
    if birdeye_config.api_key.is_none() {
        tracing::warn!(
            "No Birdeye API key configured - overview, history and volume will show N/A"
        );
    }

    let jupiter = Arc::new(JupiterPriceClient::with_url(
        transport.clone(),
        config.providers.jupiter_price_url.clone(),
    ));
    let birdeye = Arc::new(BirdeyeClient::new(transport, birdeye_config));

    let providers = Providers {
        spot: jupiter,
        overview: birdeye.clone(),
        history: birdeye.clone(),
        volume: birdeye,
    };
    let reference = config.reference_token()?;
    Ok(MetricsAggregator::new(providers, reference.address))
}

async fn run_command(cmd: RunCmd, verbose: bool, debug: bool) -> Result<()> {
    let mut config = load(&cmd.config, verbose, debug)?;
    if let Some(interval) = cmd.interval {
        config.status.interval_secs = interval;
        config.validate().context("Invalid --interval")?;
    }

    tracing::info!("Starting labs-ticker status loop...");

    let aggregator = Arc::new(build_aggregator(&config)?);
    let scheduler = StatusScheduler::new(
        aggregator,
        config.token_registry()?,
        config.rotation()?,
        Arc::new(ConsoleHost::single("console")),
        config.status_config(),
    )
    .context("Failed to create status scheduler")?;

    scheduler.start().context("Failed to start status loop")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutdown signal received");

    scheduler.stop();
    // Let in-flight updates settle before the runtime goes away
    tokio::time::sleep(Duration::from_millis(200)).await;
    tracing::info!("labs-ticker stopped");
    Ok(())
}

async fn snapshot_command(cmd: SnapshotCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load(&cmd.config, verbose, debug)?;
    let registry = config.token_registry()?;
    let token = registry
        .get(&cmd.symbol)
        .with_context(|| format!("Unknown token symbol '{}'", cmd.symbol))?;
    let reference = config.reference_token()?;
    let label = cmd.label.clone().unwrap_or_else(|| token.symbol.clone());

    let aggregator = build_aggregator(&config)?;
    let outcome = aggregator.snapshot(&token.address, &label).await;

    match cmd.format.as_str() {
        "json" => match &outcome {
            SnapshotOutcome::Displayable(snapshot) => {
                println!("{}", serde_json::to_string_pretty(snapshot)?);
            }
            SnapshotOutcome::NotDisplayable { token, label } => {
                let body = serde_json::json!({
                    "displayable": false,
                    "token": token,
                    "label": label,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        },
        _ => println!(
            "{}",
            render_outcome(&outcome, &reference.symbol, config.display.price_decimal_places)
        ),
    }

    Ok(())
}

async fn price_command(cmd: PriceCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load(&cmd.config, verbose, debug)?;
    let registry = config.token_registry()?;
    let token = registry
        .get(&cmd.symbol)
        .with_context(|| format!("Unknown token symbol '{}'", cmd.symbol))?;

    let aggregator = build_aggregator(&config)?;
    match aggregator.price_snapshot(&token.address, &token.symbol).await.price() {
        Some(price) => println!("{}: ${:.4}", token.symbol, price),
        None => println!("Could not fetch the {} price at the moment.", token.symbol),
    }
    Ok(())
}
