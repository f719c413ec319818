use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{PricePoint, TokenAddress, TokenOverview, VolumeStats, VolumeWindow};
use super::http::{HttpRequest, HttpTransport, TransportError};
use super::market_data::{PriceHistoryPort, PriceVolumePort, SpotPricePort, TokenOverviewPort};
use super::presentation::{PresentationError, PresentationHost, PresentationTarget};

/// Mock HTTP transport that records requests and replays scripted responses.
/// Responses are matched by URL substring, first match wins.
#[derive(Debug, Default, Clone)]
pub struct MockTransport {
    calls: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<Vec<(String, Result<Value, TransportError>)>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a response for URLs containing `url_part`
    pub fn with_response(self, url_part: &str, response: Result<Value, TransportError>) -> Self {
        self.responses.lock().unwrap().push((url_part.to_string(), response));
        self
    }

    /// Get all recorded requests
    pub fn get_calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get_json(&self, request: HttpRequest) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .iter()
            .find(|(part, _)| request.url.contains(part.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Err(TransportError::Network("No response configured".to_string())))
    }
}

/// Mock market data provider covering all four provider ports
#[derive(Debug, Default, Clone)]
pub struct MockMarketData {
    calls: Arc<Mutex<Vec<String>>>,
    prices: Arc<Mutex<HashMap<String, f64>>>,
    overviews: Arc<Mutex<HashMap<String, TokenOverview>>>,
    histories: Arc<Mutex<HashMap<String, Vec<PricePoint>>>>,
    volumes: Arc<Mutex<HashMap<(String, VolumeWindow), VolumeStats>>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, token: &str, price: f64) -> Self {
        self.prices.lock().unwrap().insert(token.to_string(), price);
        self
    }

    pub fn with_overview(self, token: &str, overview: TokenOverview) -> Self {
        self.overviews.lock().unwrap().insert(token.to_string(), overview);
        self
    }

    pub fn with_history(self, token: &str, series: Vec<PricePoint>) -> Self {
        self.histories.lock().unwrap().insert(token.to_string(), series);
        self
    }

    pub fn with_volume(self, token: &str, window: VolumeWindow, stats: VolumeStats) -> Self {
        self.volumes.lock().unwrap().insert((token.to_string(), window), stats);
        self
    }

    /// Recorded calls as "<method>:<token>"
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made for one method, e.g. "spot_price"
    pub fn count(&self, method: &str) -> usize {
        let prefix = format!("{}:", method);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .count()
    }

    fn record(&self, method: &str, token: &TokenAddress) {
        self.calls.lock().unwrap().push(format!("{}:{}", method, token));
    }
}

#[async_trait]
impl SpotPricePort for MockMarketData {
    async fn spot_price(&self, token: &TokenAddress) -> Option<f64> {
        self.record("spot_price", token);
        self.prices.lock().unwrap().get(token.as_str()).copied()
    }
}

#[async_trait]
impl TokenOverviewPort for MockMarketData {
    async fn overview(&self, token: &TokenAddress) -> Option<TokenOverview> {
        self.record("overview", token);
        self.overviews.lock().unwrap().get(token.as_str()).cloned()
    }
}

#[async_trait]
impl PriceHistoryPort for MockMarketData {
    async fn price_history(&self, token: &TokenAddress, _from: i64, _to: i64) -> Option<Vec<PricePoint>> {
        self.record("price_history", token);
        self.histories.lock().unwrap().get(token.as_str()).cloned()
    }
}

#[async_trait]
impl PriceVolumePort for MockMarketData {
    async fn price_volume(&self, token: &TokenAddress, window: VolumeWindow) -> Option<VolumeStats> {
        self.record("price_volume", token);
        self.volumes
            .lock()
            .unwrap()
            .get(&(token.as_str().to_string(), window))
            .cloned()
    }
}

/// Presentation target that records every update
#[derive(Debug, Default)]
pub struct RecordingTarget {
    name: String,
    fail: bool,
    display_names: Mutex<Vec<String>>,
    activities: Mutex<Vec<String>>,
}

impl RecordingTarget {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Default::default() }
    }

    /// Target that rejects every update
    pub fn failing(name: &str) -> Self {
        Self { name: name.to_string(), fail: true, ..Default::default() }
    }

    pub fn display_names(&self) -> Vec<String> {
        self.display_names.lock().unwrap().clone()
    }

    pub fn activities(&self) -> Vec<String> {
        self.activities.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), PresentationError> {
        if self.fail {
            return Err(PresentationError::Rejected {
                target: self.name.clone(),
                reason: "missing permissions".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PresentationTarget for RecordingTarget {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn set_display_name(&self, display_name: &str) -> Result<(), PresentationError> {
        self.check()?;
        self.display_names.lock().unwrap().push(display_name.to_string());
        Ok(())
    }

    async fn set_activity(&self, activity: &str) -> Result<(), PresentationError> {
        self.check()?;
        self.activities.lock().unwrap().push(activity.to_string());
        Ok(())
    }
}

/// Host serving a fixed set of targets, or `NotReady` when built with `not_ready`
#[derive(Default)]
pub struct StaticHost {
    targets: Option<Vec<Arc<dyn PresentationTarget>>>,
}

impl StaticHost {
    pub fn new(targets: Vec<Arc<dyn PresentationTarget>>) -> Self {
        Self { targets: Some(targets) }
    }

    pub fn not_ready() -> Self {
        Self { targets: None }
    }
}

#[async_trait]
impl PresentationHost for StaticHost {
    async fn targets(&self) -> Result<Vec<Arc<dyn PresentationTarget>>, PresentationError> {
        self.targets.clone().ok_or(PresentationError::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport() {
        let mock = MockTransport::new()
            .with_response("price/v2", Ok(json!({"data": {}})));

        let hit = mock.get_json(HttpRequest::get("https://lite-api.jup.ag/price/v2")).await;
        assert_eq!(hit, Ok(json!({"data": {}})));

        let miss = mock.get_json(HttpRequest::get("https://example.com")).await;
        assert!(matches!(miss, Err(TransportError::Network(_))));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_market_data() {
        let token = TokenAddress::new("LABS").unwrap();
        let mock = MockMarketData::new().with_price("LABS", 0.5);

        assert_eq!(mock.spot_price(&token).await, Some(0.5));
        assert_eq!(mock.overview(&token).await, None);
        assert_eq!(mock.get_calls(), vec!["spot_price:LABS".to_string(), "overview:LABS".to_string()]);
        assert_eq!(mock.count("spot_price"), 1);
    }

    #[tokio::test]
    async fn test_recording_target() {
        let ok = RecordingTarget::new("guild-a");
        ok.set_display_name("$1.0000").await.unwrap();
        assert_eq!(ok.display_names(), vec!["$1.0000".to_string()]);

        let failing = RecordingTarget::failing("guild-b");
        assert!(failing.set_activity("LABS Price").await.is_err());
        assert!(failing.activities().is_empty());
    }
}
