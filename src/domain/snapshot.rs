//! Metrics Snapshot
//!
//! Aggregated, partially-available market metrics for one token at one instant.
//! Every secondary field is independently optional; a missing field is a valid
//! state, never a reason to reject the snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::change::HistoricalChange;
use super::token::TokenAddress;

/// Market overview figures for a token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenOverview {
    pub market_cap: Option<f64>,
    pub price_change_24h_percent: Option<f64>,
    pub holders: Option<u64>,
    pub liquidity: Option<f64>,
}

/// Trading window for price/volume figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeWindow {
    OneHour,
    TwentyFourHours,
}

impl VolumeWindow {
    /// Provider query value for this window
    pub fn as_param(&self) -> &'static str {
        match self {
            VolumeWindow::OneHour => "1h",
            VolumeWindow::TwentyFourHours => "24h",
        }
    }
}

/// Price and volume figures over one trading window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeStats {
    pub price: Option<f64>,
    pub price_change_percent: Option<f64>,
    pub volume_usd: Option<f64>,
    pub volume_change_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub token: TokenAddress,
    pub label: String,
    /// Spot price in quote-currency units
    pub price: f64,
    /// Spot price of the reference token (e.g. SOL)
    pub reference_price: Option<f64>,
    pub liquidity: Option<f64>,
    pub market_cap: Option<f64>,
    pub holders: Option<u64>,
    pub change_24h_percent: Option<f64>,
    pub change_1w_percent: Option<f64>,
    pub change_1m_percent: Option<f64>,
    pub volume_1h: Option<VolumeStats>,
    pub volume_24h: Option<VolumeStats>,
    /// price / reference_price
    pub ratio: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

impl MetricsSnapshot {
    /// Snapshot carrying only the spot price
    pub fn price_only(token: TokenAddress, label: impl Into<String>, price: f64) -> Self {
        Self {
            token,
            label: label.into(),
            price,
            reference_price: None,
            liquidity: None,
            market_cap: None,
            holders: None,
            change_24h_percent: None,
            change_1w_percent: None,
            change_1m_percent: None,
            volume_1h: None,
            volume_24h: None,
            ratio: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn with_reference_price(mut self, reference_price: Option<f64>) -> Self {
        self.reference_price = reference_price;
        self.ratio = reference_price.and_then(|reference| cross_ratio(self.price, reference));
        self
    }

    pub fn with_overview(mut self, overview: Option<TokenOverview>) -> Self {
        let overview = overview.unwrap_or_default();
        self.liquidity = overview.liquidity;
        self.market_cap = overview.market_cap;
        self.holders = overview.holders;
        self.change_24h_percent = overview.price_change_24h_percent;
        self
    }

    pub fn with_historical_change(mut self, change: HistoricalChange) -> Self {
        self.change_1w_percent = change.week;
        self.change_1m_percent = change.month;
        self
    }

    pub fn with_volume(mut self, window: VolumeWindow, stats: Option<VolumeStats>) -> Self {
        match window {
            VolumeWindow::OneHour => self.volume_1h = stats,
            VolumeWindow::TwentyFourHours => self.volume_24h = stats,
        }
        self
    }

    /// Names of secondary fields with no data
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("reference_price", self.reference_price.is_none()),
            ("liquidity", self.liquidity.is_none()),
            ("market_cap", self.market_cap.is_none()),
            ("holders", self.holders.is_none()),
            ("change_24h", self.change_24h_percent.is_none()),
            ("change_1w", self.change_1w_percent.is_none()),
            ("change_1m", self.change_1m_percent.is_none()),
            ("volume_1h", self.volume_1h.is_none()),
            ("volume_24h", self.volume_24h.is_none()),
            ("ratio", self.ratio.is_none()),
        ];
        checks
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }
}

/// Outcome of an aggregation call
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotOutcome {
    Displayable(MetricsSnapshot),
    /// The primary spot price could not be obtained
    NotDisplayable { token: TokenAddress, label: String },
}

impl SnapshotOutcome {
    pub fn is_displayable(&self) -> bool {
        matches!(self, SnapshotOutcome::Displayable(_))
    }

    pub fn snapshot(&self) -> Option<&MetricsSnapshot> {
        match self {
            SnapshotOutcome::Displayable(snapshot) => Some(snapshot),
            SnapshotOutcome::NotDisplayable { .. } => None,
        }
    }

    pub fn price(&self) -> Option<f64> {
        self.snapshot().map(|s| s.price)
    }
}

/// Price of one token in units of another.
/// None when the reference price is zero or the result is not finite.
pub fn cross_ratio(price: f64, reference_price: f64) -> Option<f64> {
    if reference_price == 0.0 {
        return None;
    }
    let ratio = price / reference_price;
    ratio.is_finite().then_some(ratio)
}
