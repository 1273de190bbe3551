//! Memoizing decorator around any provider
//!
//! Successful `series` and `snapshot` responses are kept for the life of the
//! decorator; errors are never cached so a later call retries upstream.
//! Spot prices pass straight through.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokenomics_core::Usd;
use tokenomics_ports::{DataResult, HistoricalDataProvider, MarketSnapshot, PriceSeries};

pub struct CachingProvider<P> {
    inner: P,
    series: DashMap<(String, u32), PriceSeries>,
    snapshots: DashMap<String, MarketSnapshot>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P: HistoricalDataProvider> CachingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            series: DashMap::new(),
            snapshots: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.series.clear();
        self.snapshots.clear();
    }
}

#[async_trait]
impl<P: HistoricalDataProvider> HistoricalDataProvider for CachingProvider<P> {
    async fn spot(&self, asset: &str) -> DataResult<Usd> {
        self.inner.spot(asset).await
    }

    async fn snapshot(&self, asset: &str) -> DataResult<MarketSnapshot> {
        if let Some(cached) = self.snapshots.get(asset) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(*cached);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let snapshot = self.inner.snapshot(asset).await?;
        self.snapshots.insert(asset.to_string(), snapshot);
        Ok(snapshot)
    }

    async fn series(&self, asset: &str, lookback_days: u32) -> DataResult<PriceSeries> {
        let key = (asset.to_string(), lookback_days);
        if let Some(cached) = self.series.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("Series cache hit for {} ({} days)", asset, lookback_days);
            return Ok(cached.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let series = self.inner.series(asset, lookback_days).await?;
        self.series.insert(key, series.clone());
        Ok(series)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
