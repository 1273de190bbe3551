//! In-memory provider for tests and offline runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokenomics_core::Usd;
use tokenomics_ports::{DataError, DataResult, HistoricalDataProvider, MarketSnapshot, PriceSeries};

#[derive(Debug, Clone, Default)]
struct Fixture {
    snapshot: Option<MarketSnapshot>,
    series: Option<PriceSeries>,
}

/// Serves fixed snapshots and series, or fails every call
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    fixtures: HashMap<String, Fixture>,
    failure: Option<DataError>,
    delay: Option<Duration>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose every call returns `error`
    pub fn failing(error: DataError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    pub fn with_series(mut self, asset: impl Into<String>, series: PriceSeries) -> Self {
        self.fixtures.entry(asset.into()).or_default().series = Some(series);
        self
    }

    pub fn with_snapshot(mut self, asset: impl Into<String>, snapshot: MarketSnapshot) -> Self {
        self.fixtures.entry(asset.into()).or_default().snapshot = Some(snapshot);
        self
    }

    /// Sleep before answering, to exercise caller timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn fixture(&self, asset: &str) -> DataResult<&Fixture> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.fixtures
            .get(asset)
            .ok_or_else(|| DataError::NotFound(asset.to_string()))
    }
}

#[async_trait]
impl HistoricalDataProvider for StaticProvider {
    async fn spot(&self, asset: &str) -> DataResult<Usd> {
        let fixture = self.fixture(asset).await?;
        fixture
            .snapshot
            .map(|s| s.price)
            .or_else(|| fixture.series.as_ref().and_then(PriceSeries::last_price))
            .ok_or_else(|| DataError::Empty(asset.to_string()))
    }

    async fn snapshot(&self, asset: &str) -> DataResult<MarketSnapshot> {
        self.fixture(asset)
            .await?
            .snapshot
            .ok_or_else(|| DataError::Empty(asset.to_string()))
    }

    /// The newest `lookback_days` points of the fixture series
    async fn series(&self, asset: &str, lookback_days: u32) -> DataResult<PriceSeries> {
        let series = self
            .fixture(asset)
            .await?
            .series
            .as_ref()
            .ok_or_else(|| DataError::Empty(asset.to_string()))?;

        let take = |v: &[f64]| {
            let start = v.len().saturating_sub(lookback_days as usize);
            v[start..].to_vec()
        };
        Ok(PriceSeries::new(
            take(&series.prices),
            take(&series.market_caps),
            take(&series.volumes),
        ))
    }

    fn name(&self) -> &str {
        "Static"
    }
}
