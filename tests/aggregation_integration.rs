//! Ticker Integration Tests
//!
//! End-to-end flows through the real provider clients and application layer:
//! 1. Jupiter + Birdeye clients -> MetricsAggregator full snapshot
//! 2. Provider failures degrade fields instead of failing the snapshot
//! 3. StatusScheduler rotation against recording presentation targets
//!
//! All tests are deterministic (no real network calls) and use a scripted transport.

use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use serde_json::{json, Value};

use labs_ticker::adapters::cli::{render_outcome, DEGRADED_MESSAGE};
use labs_ticker::adapters::{BirdeyeClient, BirdeyeConfig, JupiterPriceClient};
use labs_ticker::application::{MetricsAggregator, Providers, StatusConfig, StatusScheduler};
use labs_ticker::config::parse_config;
use labs_ticker::domain::TokenAddress;
use labs_ticker::ports::http::TransportError;
use labs_ticker::ports::mocks::{MockTransport, RecordingTarget, StaticHost};
use labs_ticker::ports::presentation::PresentationTarget;

const LABS: &str = "LABSh5DTebUcUbEoLzXKCiXFJLecDFiDWiBGUU1GpxR";
const SOL: &str = "So11111111111111111111111111111111111111112";
const DAY: i64 = 86_400;

// ============================================================================
// Test Fixtures
// ============================================================================

fn jupiter_prices(labs: &str, sol: &str) -> Value {
    json!({
        "data": {
            LABS: { "id": LABS, "type": "derivedPrice", "price": labs },
            SOL: { "id": SOL, "type": "derivedPrice", "price": sol },
        },
        "timeTaken": 0.003
    })
}

fn birdeye_overview() -> Value {
    json!({
        "success": true,
        "data": {
            "address": LABS,
            "marketCap": 2_000_000.0,
            "priceChange24hPercent": -3.5,
            "holder": 4321,
            "liquidity": 150_000.0
        }
    })
}

/// Samples one day, eight days and thirty-one days back, at 0.015, 0.01 and 0.005
fn birdeye_history() -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "success": true,
        "data": {
            "items": [
                { "unixTime": now - 31 * DAY, "value": 0.005 },
                { "unixTime": now - 8 * DAY, "value": 0.01 },
                { "unixTime": now - DAY, "value": 0.015 },
            ]
        }
    })
}

fn birdeye_volume() -> Value {
    json!({
        "success": true,
        "data": {
            "price": 0.02,
            "priceChangePercent": 1.25,
            "volumeUSD": 54_321.5,
            "volumeChangePercent": 10.0
        }
    })
}

fn full_transport() -> MockTransport {
    MockTransport::new()
        .with_response("jup.ag", Ok(jupiter_prices("0.02", "100")))
        .with_response("/defi/token_overview", Ok(birdeye_overview()))
        .with_response("/defi/history_price", Ok(birdeye_history()))
        .with_response("/defi/price_volume/single", Ok(birdeye_volume()))
}

fn aggregator(transport: &MockTransport, birdeye: BirdeyeConfig) -> MetricsAggregator {
    let transport = Arc::new(transport.clone());
    let jupiter = Arc::new(JupiterPriceClient::with_url(
        transport.clone(),
        "https://lite-api.jup.ag/price/v2",
    ));
    let birdeye = Arc::new(BirdeyeClient::new(transport, birdeye));

    let providers = Providers {
        spot: jupiter,
        overview: birdeye.clone(),
        history: birdeye.clone(),
        volume: birdeye,
    };
    MetricsAggregator::new(providers, TokenAddress::new(SOL).unwrap())
}

fn birdeye_calls(transport: &MockTransport) -> usize {
    transport
        .get_calls()
        .iter()
        .filter(|call| call.url.contains("birdeye"))
        .count()
}

// ============================================================================
// Aggregation Flow Tests
// ============================================================================

#[tokio::test]
async fn test_full_snapshot_through_real_clients() {
    let transport = full_transport();
    let aggregator = aggregator(&transport, BirdeyeConfig::with_api_key("test-key"));

    let outcome = aggregator.snapshot(&TokenAddress::new(LABS).unwrap(), "Labs").await;
    let snapshot = outcome.snapshot().expect("snapshot should be displayable");

    assert_relative_eq!(snapshot.price, 0.02);
    assert_relative_eq!(snapshot.reference_price.unwrap(), 100.0);
    assert_relative_eq!(snapshot.ratio.unwrap(), 0.0002, epsilon = 1e-12);
    assert_eq!(snapshot.market_cap, Some(2_000_000.0));
    assert_eq!(snapshot.holders, Some(4321));
    assert_eq!(snapshot.liquidity, Some(150_000.0));
    assert_eq!(snapshot.change_24h_percent, Some(-3.5));
    assert_relative_eq!(snapshot.change_1w_percent.unwrap(), 100.0, epsilon = 1e-9);
    assert_relative_eq!(snapshot.change_1m_percent.unwrap(), 300.0, epsilon = 1e-9);
    assert_eq!(snapshot.volume_24h.as_ref().and_then(|v| v.volume_usd), Some(54_321.5));
    assert_eq!(snapshot.volume_1h.as_ref().and_then(|v| v.volume_usd), Some(54_321.5));
    assert!(snapshot.missing_fields().is_empty());

    // 2 prices + overview + history + 2 volume windows
    assert_eq!(transport.call_count(), 6);

    let overview = transport
        .get_calls()
        .into_iter()
        .find(|call| call.url.contains("token_overview"))
        .unwrap();
    assert!(overview
        .headers
        .iter()
        .any(|(name, value)| name == "X-API-KEY" && value == "test-key"));
}

#[tokio::test]
async fn test_missing_credential_skips_birdeye_entirely() {
    let transport = full_transport();
    let aggregator = aggregator(&transport, BirdeyeConfig::default());

    let outcome = aggregator.snapshot(&TokenAddress::new(LABS).unwrap(), "Labs").await;
    let snapshot = outcome.snapshot().expect("price alone keeps the snapshot displayable");

    assert_relative_eq!(snapshot.price, 0.02);
    assert!(snapshot.ratio.is_some());
    assert_eq!(snapshot.market_cap, None);
    assert_eq!(snapshot.change_1w_percent, None);
    assert!(snapshot.volume_24h.is_none());
    assert_eq!(birdeye_calls(&transport), 0);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_birdeye_outage_degrades_fields() {
    let transport = MockTransport::new()
        .with_response("jup.ag", Ok(jupiter_prices("0.02", "100")))
        .with_response("birdeye", Err(TransportError::Status(503)));
    let aggregator = aggregator(&transport, BirdeyeConfig::with_api_key("test-key"));

    let outcome = aggregator.snapshot(&TokenAddress::new(LABS).unwrap(), "Labs").await;
    let snapshot = outcome.snapshot().unwrap();

    let missing = snapshot.missing_fields();
    assert!(missing.contains(&"market_cap"));
    assert!(missing.contains(&"change_1w"));
    assert!(missing.contains(&"volume_1h"));
    assert!(!missing.contains(&"ratio"));

    let text = render_outcome(&outcome, "SOL", 2);
    assert!(text.lines().any(|l| l.contains("Market Cap") && l.ends_with("N/A")));
    assert!(text.contains("$0.0200"));
}

#[tokio::test]
async fn test_primary_price_missing_is_not_displayable() {
    let transport = MockTransport::new()
        .with_response("jup.ag", Ok(json!({ "data": { SOL: { "price": "100" } } })))
        .with_response("birdeye", Ok(birdeye_overview()));
    let aggregator = aggregator(&transport, BirdeyeConfig::with_api_key("test-key"));

    let outcome = aggregator.snapshot(&TokenAddress::new(LABS).unwrap(), "Labs").await;

    assert!(!outcome.is_displayable());
    assert_eq!(render_outcome(&outcome, "SOL", 2), DEGRADED_MESSAGE);
    assert_eq!(birdeye_calls(&transport), 0);
}

#[tokio::test]
async fn test_zero_reference_price_drops_ratio_only() {
    let transport = MockTransport::new()
        .with_response("jup.ag", Ok(jupiter_prices("0.02", "0")))
        .with_response("birdeye", Err(TransportError::Network("unused".to_string())));
    let aggregator = aggregator(&transport, BirdeyeConfig::default());

    let outcome = aggregator.snapshot(&TokenAddress::new(LABS).unwrap(), "Labs").await;
    let snapshot = outcome.snapshot().unwrap();

    assert_eq!(snapshot.reference_price, Some(0.0));
    assert_eq!(snapshot.ratio, None);
}

// ============================================================================
// Status Scheduler Flow Tests
// ============================================================================

const CONFIG: &str = r#"
[status]
interval_secs = 30
rotation = ["LABS", "SOL", "WATTLABS"]
display_decimals = 4
"#;

fn scheduler(
    transport: &MockTransport,
    targets: Vec<Arc<dyn PresentationTarget>>,
) -> StatusScheduler {
    let config = parse_config(CONFIG).unwrap();
    StatusScheduler::new(
        Arc::new(aggregator(transport, BirdeyeConfig::default())),
        config.token_registry().unwrap(),
        config.rotation().unwrap(),
        Arc::new(StaticHost::new(targets)),
        config.status_config(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_rotation_pushes_status_to_every_target() {
    let transport = MockTransport::new().with_response("jup.ag", Ok(jupiter_prices("0.0123", "150.5")));
    let first = Arc::new(RecordingTarget::new("guild-a"));
    let second = Arc::new(RecordingTarget::new("guild-b"));
    let scheduler = scheduler(
        &transport,
        vec![
            first.clone() as Arc<dyn PresentationTarget>,
            second.clone() as Arc<dyn PresentationTarget>,
        ],
    );

    let report = scheduler.update_now().await;
    assert_eq!(report.symbol, "LABS");
    assert_eq!(report.updated, 2);

    let report = scheduler.tick().await;
    assert_eq!(report.symbol, "SOL");

    // Unknown symbol falls back to the first known token
    let report = scheduler.tick().await;
    assert_eq!(report.symbol, "LABS");
    assert_eq!(scheduler.current_index(), 2);

    for target in [&first, &second] {
        assert_eq!(target.display_names(), vec!["$0.0123", "$150.5000", "$0.0123"]);
        assert_eq!(target.activities(), vec!["LABS Price", "SOL Price", "LABS Price"]);
    }

    // Price-only updates never reach Birdeye
    assert_eq!(birdeye_calls(&transport), 0);
}

#[tokio::test]
async fn test_failing_target_does_not_block_others() {
    let transport = MockTransport::new().with_response("jup.ag", Ok(jupiter_prices("0.0123", "150.5")));
    let broken = Arc::new(RecordingTarget::failing("broken"));
    let healthy = Arc::new(RecordingTarget::new("healthy"));
    let scheduler = scheduler(
        &transport,
        vec![
            broken.clone() as Arc<dyn PresentationTarget>,
            healthy.clone() as Arc<dyn PresentationTarget>,
        ],
    );

    let report = scheduler.update_now().await;

    assert_eq!(report.updated, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(healthy.display_names(), vec!["$0.0123"]);
}

#[tokio::test]
async fn test_price_outage_leaves_status_untouched() {
    let transport = MockTransport::new().with_response("jup.ag", Err(TransportError::Status(500)));
    let target = Arc::new(RecordingTarget::new("guild"));
    let scheduler = scheduler(&transport, vec![target.clone() as Arc<dyn PresentationTarget>]);

    let report = scheduler.update_now().await;

    assert_eq!(report.price, None);
    assert_eq!(report.updated, 0);
    assert!(target.display_names().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timer_rotates_until_stopped() {
    let transport = MockTransport::new().with_response("jup.ag", Ok(jupiter_prices("0.0123", "150.5")));
    let target = Arc::new(RecordingTarget::new("guild"));
    let scheduler = scheduler(&transport, vec![target.clone() as Arc<dyn PresentationTarget>]);

    scheduler.start().unwrap();
    assert!(scheduler.is_running());
    tokio::time::sleep(Duration::from_secs(65)).await;

    assert_eq!(scheduler.current_index(), 2);
    assert_eq!(target.activities(), vec!["LABS Price", "SOL Price", "LABS Price"]);

    scheduler.stop();
    assert!(!scheduler.is_running());
    tokio::time::sleep(Duration::from_secs(120)).await;

    assert_eq!(scheduler.current_index(), 2);
    assert_eq!(target.activities().len(), 3);
}

#[test]
fn test_default_status_config_matches_loader_defaults() {
    let config = parse_config("").unwrap();
    let status = config.status_config();
    let defaults = StatusConfig::default();

    assert_eq!(status.interval, defaults.interval);
    assert_eq!(status.display_decimals, defaults.display_decimals);
}
