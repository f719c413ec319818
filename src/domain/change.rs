//! Historical price change
//!
//! Compares the current price against the historical sample nearest to a
//! target offset (1 week, 1 month).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Offset for the weekly change
pub const WEEK_OFFSET_DAYS: i64 = 7;
/// Offset for the monthly change
pub const MONTH_OFFSET_DAYS: i64 = 30;
/// History window requested from the provider, covers the monthly target
pub const HISTORY_WINDOW_DAYS: i64 = 31;

/// One historical price sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in seconds
    pub unix_time: i64,
    pub price: f64,
}

/// Week and month price change in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalChange {
    pub week: Option<f64>,
    pub month: Option<f64>,
}

impl HistoricalChange {
    /// No data for either offset
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Derive both offsets from one series. Each offset is computed on its
    /// own, so a gap on one side never hides the other.
    pub fn from_series(series: &[PricePoint], current_price: f64, now: DateTime<Utc>) -> Self {
        let change_at = |days: i64| {
            let target = (now - Duration::days(days)).timestamp();
            nearest_sample(series, target).and_then(|sample| percent_change(current_price, sample.price))
        };

        Self {
            week: change_at(WEEK_OFFSET_DAYS),
            month: change_at(MONTH_OFFSET_DAYS),
        }
    }
}

/// Sample with the smallest absolute distance to `target` (unix seconds).
/// Ties keep the earlier sample in series order.
pub fn nearest_sample(series: &[PricePoint], target: i64) -> Option<&PricePoint> {
    series
        .iter()
        .min_by_key(|point| (point.unix_time - target).unsigned_abs())
}

/// (current - past) / past * 100, None when past is zero or the result is not finite
pub fn percent_change(current: f64, past: f64) -> Option<f64> {
    if past == 0.0 {
        return None;
    }
    let change = (current - past) / past * 100.0;
    change.is_finite().then_some(change)
}
