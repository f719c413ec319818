use async_trait::async_trait;

use crate::domain::{PricePoint, TokenAddress};
use crate::ports::market_data::{PriceHistoryPort, ProviderError};
use super::client::{absent_on_error, BirdeyeClient};
use super::types::HistoryData;

impl BirdeyeClient {
    /// Price samples between `from` and `to` (unix seconds), oldest first
    pub async fn get_price_history(
        &self,
        token: &TokenAddress,
        from: i64,
        to: i64,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        let query = [
            ("address", token.to_string()),
            ("address_type", "token".to_string()),
            ("type", self.config.history_resolution.clone()),
            ("time_from", from.to_string()),
            ("time_to", to.to_string()),
        ];
        let data: HistoryData = self.get_data("/defi/history_price", &query).await?;
        Ok(data.into_series())
    }
}

#[async_trait]
impl PriceHistoryPort for BirdeyeClient {
    async fn price_history(&self, token: &TokenAddress, from: i64, to: i64) -> Option<Vec<PricePoint>> {
        absent_on_error("price history", token.as_str(), self.get_price_history(token, from, to).await)
    }
}
