use async_trait::async_trait;

use crate::{error::FetchError, models::PriceSample};

/// Where the monitor gets its latest price from.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_latest_price(&self, ticker: &str) -> Result<PriceSample, FetchError>;
}
