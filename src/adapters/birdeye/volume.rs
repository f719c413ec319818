use async_trait::async_trait;

use crate::domain::{TokenAddress, VolumeStats, VolumeWindow};
use crate::ports::market_data::{PriceVolumePort, ProviderError};
use super::client::{absent_on_error, BirdeyeClient};
use super::types::PriceVolumeData;

impl BirdeyeClient {
    /// Price and volume with their change over `window`
    pub async fn get_price_volume(
        &self,
        token: &TokenAddress,
        window: VolumeWindow,
    ) -> Result<VolumeStats, ProviderError> {
        let query = [
            ("address", token.to_string()),
            ("type", window.as_param().to_string()),
        ];
        let data: PriceVolumeData = self.get_data("/defi/price_volume/single", &query).await?;
        Ok(data.into())
    }
}

#[async_trait]
impl PriceVolumePort for BirdeyeClient {
    async fn price_volume(&self, token: &TokenAddress, window: VolumeWindow) -> Option<VolumeStats> {
        let what = format!("{} volume", window.as_param());
        absent_on_error(&what, token.as_str(), self.get_price_volume(token, window).await)
    }
}
