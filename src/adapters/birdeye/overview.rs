use async_trait::async_trait;

use crate::domain::{TokenAddress, TokenOverview};
use crate::ports::market_data::{ProviderError, TokenOverviewPort};
use super::client::{absent_on_error, BirdeyeClient};
use super::types::OverviewData;

impl BirdeyeClient {
    /// Market cap, liquidity, holders and 24h change for a token
    pub async fn get_token_overview(&self, token: &TokenAddress) -> Result<TokenOverview, ProviderError> {
        let data: OverviewData = self
            .get_data("/defi/token_overview", &[("address", token.to_string())])
            .await?;
        Ok(data.into())
    }
}

#[async_trait]
impl TokenOverviewPort for BirdeyeClient {
    async fn overview(&self, token: &TokenAddress) -> Option<TokenOverview> {
        absent_on_error("overview", token.as_str(), self.get_token_overview(token).await)
    }
}
