//! Metrics Aggregator
//!
//! Combines the independently failing provider calls for one token into a
//! single `SnapshotOutcome`. A missing primary price makes the snapshot not
//! displayable; any other missing input only blanks the fields derived from it.

use std::sync::Arc;
use chrono::{Duration, Utc};

use crate::domain::{
    HistoricalChange, MetricsSnapshot, SnapshotOutcome, TokenAddress, VolumeWindow,
};
use crate::domain::change::HISTORY_WINDOW_DAYS;
use crate::ports::market_data::{
    PriceHistoryPort, PriceVolumePort, SpotPricePort, TokenOverviewPort,
};

/// Provider ports used by the aggregator
#[derive(Clone)]
pub struct Providers {
    pub spot: Arc<dyn SpotPricePort>,
    pub overview: Arc<dyn TokenOverviewPort>,
    pub history: Arc<dyn PriceHistoryPort>,
    pub volume: Arc<dyn PriceVolumePort>,
}

impl Providers {
    /// Use one implementation for every port
    pub fn from_single<P>(provider: Arc<P>) -> Self
    where
        P: SpotPricePort + TokenOverviewPort + PriceHistoryPort + PriceVolumePort + 'static,
    {
        Self {
            spot: provider.clone(),
            overview: provider.clone(),
            history: provider.clone(),
            volume: provider,
        }
    }
}

#[derive(Clone)]
pub struct MetricsAggregator {
    providers: Providers,
    /// Token the primary price is compared against (e.g. SOL)
    reference: TokenAddress,
}

impl MetricsAggregator {
    pub fn new(providers: Providers, reference: TokenAddress) -> Self {
        Self { providers, reference }
    }

    pub fn reference(&self) -> &TokenAddress {
        &self.reference
    }

    /// Full metrics snapshot for `token`
    pub async fn snapshot(&self, token: &TokenAddress, label: &str) -> SnapshotOutcome {
        tracing::info!("Fetching metrics for {} ({})", label, token);

        let (price, reference_price) = tokio::join!(
            self.providers.spot.spot_price(token),
            self.providers.spot.spot_price(&self.reference),
        );

        let Some(price) = price else {
            tracing::warn!("No spot price for {} ({}), snapshot not displayable", label, token);
            return not_displayable(token, label);
        };
        if reference_price.is_none() {
            tracing::warn!("No reference price for {}, ratio unavailable", self.reference);
        }

        let now = Utc::now();
        let from = (now - Duration::days(HISTORY_WINDOW_DAYS)).timestamp();

        let (overview, history, volume_24h, volume_1h) = tokio::join!(
            self.providers.overview.overview(token),
            self.providers.history.price_history(token, from, now.timestamp()),
            self.providers.volume.price_volume(token, VolumeWindow::TwentyFourHours),
            self.providers.volume.price_volume(token, VolumeWindow::OneHour),
        );

        let change = history
            .map(|series| HistoricalChange::from_series(&series, price, now))
            .unwrap_or_else(HistoricalChange::unavailable);

        let mut snapshot = MetricsSnapshot::price_only(token.clone(), label, price)
            .with_reference_price(reference_price)
            .with_overview(overview)
            .with_historical_change(change)
            .with_volume(VolumeWindow::TwentyFourHours, volume_24h)
            .with_volume(VolumeWindow::OneHour, volume_1h);
        snapshot.fetched_at = now;

        let missing = snapshot.missing_fields();
        if !missing.is_empty() {
            tracing::debug!("Snapshot for {} missing: {}", label, missing.join(", "));
        }

        SnapshotOutcome::Displayable(snapshot)
    }

    /// Price-only snapshot, one provider call
    pub async fn price_snapshot(&self, token: &TokenAddress, label: &str) -> SnapshotOutcome {
        match self.providers.spot.spot_price(token).await {
            Some(price) => SnapshotOutcome::Displayable(MetricsSnapshot::price_only(token.clone(), label, price)),
            None => {
                tracing::debug!("No spot price for {} ({})", label, token);
                not_displayable(token, label)
            }
        }
    }
}

fn not_displayable(token: &TokenAddress, label: &str) -> SnapshotOutcome {
    SnapshotOutcome::NotDisplayable {
        token: token.clone(),
        label: label.to_string(),
    }
}
