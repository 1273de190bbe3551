use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokenomics_core::{Tokens, Usd};

use crate::error::DataResult;

/// Daily history of a reference asset, ordered oldest to newest
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    pub prices: Vec<Usd>,
    pub market_caps: Vec<Usd>,
    pub volumes: Vec<Usd>,
}

impl PriceSeries {
    pub fn new(prices: Vec<Usd>, market_caps: Vec<Usd>, volumes: Vec<Usd>) -> Self {
        Self {
            prices,
            market_caps,
            volumes,
        }
    }

    /// Series with only prices (caps and volumes left empty)
    pub fn from_prices(prices: Vec<Usd>) -> Self {
        Self {
            prices,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// An empty price vector means "use synthetic data"
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn last_price(&self) -> Option<Usd> {
        self.prices.last().copied()
    }
}

/// Current market data for a reference asset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub price: Usd,
    pub market_cap: Usd,
    pub total_supply: Tokens,
    pub circulating_supply: Tokens,
    pub volume_24h: Usd,
}

/// Port for historical and spot market data
///
/// Implementations may hit a REST API, replay fixtures, or cache another
/// provider. The simulation core only consumes the returned series and
/// falls back to synthetic data on any error or empty response.
#[async_trait]
pub trait HistoricalDataProvider: Send + Sync {
    /// Current spot price
    async fn spot(&self, asset: &str) -> DataResult<Usd>;

    /// Current price, capitalization, supply and volume
    async fn snapshot(&self, asset: &str) -> DataResult<MarketSnapshot>;

    /// Daily series covering the last `lookback_days`
    async fn series(&self, asset: &str, lookback_days: u32) -> DataResult<PriceSeries>;

    /// Provider name for logging
    fn name(&self) -> &str {
        "HistoricalDataProvider"
    }
}
