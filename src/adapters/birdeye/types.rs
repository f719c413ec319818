//! Birdeye Response Types
//!
//! Wire types for the Birdeye public API. Every field is optional: numbers that
//! are missing, null, or of the wrong type decode as `None` instead of failing
//! the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{PricePoint, TokenOverview, VolumeStats};

/// Common envelope: `{ "success": bool, "data": ... }`
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
}

/// `/defi/token_overview` data
#[derive(Debug, Default, Deserialize)]
pub struct OverviewData {
    #[serde(default, rename = "marketCap", deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    /// Older responses only carry the short name
    #[serde(default, deserialize_with = "lenient_f64")]
    pub mc: Option<f64>,
    #[serde(default, rename = "priceChange24hPercent", deserialize_with = "lenient_f64")]
    pub price_change_24h_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub holder: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liquidity: Option<f64>,
}

impl From<OverviewData> for TokenOverview {
    fn from(data: OverviewData) -> Self {
        Self {
            market_cap: data.market_cap.or(data.mc),
            price_change_24h_percent: data.price_change_24h_percent,
            holders: data.holder.filter(|h| *h >= 0.0).map(|h| h.round() as u64),
            liquidity: data.liquidity,
        }
    }
}

/// `/defi/history_price` data
#[derive(Debug, Default, Deserialize)]
pub struct HistoryData {
    #[serde(default)]
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryItem {
    #[serde(default, rename = "unixTime", deserialize_with = "lenient_f64")]
    pub unix_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,
}

impl HistoryData {
    /// Complete samples sorted by time. Items missing a field are dropped.
    pub fn into_series(self) -> Vec<PricePoint> {
        let mut series: Vec<PricePoint> = self
            .items
            .into_iter()
            .filter_map(|item| {
                Some(PricePoint {
                    unix_time: item.unix_time? as i64,
                    price: item.value?,
                })
            })
            .collect();
        series.sort_by_key(|point| point.unix_time);
        series
    }
}

/// `/defi/price_volume/single` data
#[derive(Debug, Default, Deserialize)]
pub struct PriceVolumeData {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, rename = "priceChangePercent", deserialize_with = "lenient_f64")]
    pub price_change_percent: Option<f64>,
    #[serde(default, rename = "volumeUSD", deserialize_with = "lenient_f64")]
    pub volume_usd: Option<f64>,
    #[serde(default, rename = "volumeChangePercent", deserialize_with = "lenient_f64")]
    pub volume_change_percent: Option<f64>,
}

impl From<PriceVolumeData> for VolumeStats {
    fn from(data: PriceVolumeData) -> Self {
        Self {
            price: data.price,
            price_change_percent: data.price_change_percent,
            volume_usd: data.volume_usd,
            volume_change_percent: data.volume_change_percent,
        }
    }
}

/// Numbers or numeric strings become `Some`, anything else `None`
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}
