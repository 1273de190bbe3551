//! Reference series loading
//!
//! The one blocking step of a run. The provider is awaited under a timeout,
//! transient failures are retried with linear backoff, and any remaining
//! failure (or an empty series) is replaced by synthetic history. Loading
//! never fails the run.

use std::sync::Arc;
use std::time::Duration;
use tokenomics_core::{DataSource, SimulationParameters};
use tokenomics_engine::synthetic_history;
use tokenomics_ports::{DataError, DataResult, HistoricalDataProvider, PriceSeries};

use crate::config::FetchConfig;

/// Fetch `lookback_days` of `asset`, retrying transient failures
pub async fn fetch_series(
    provider: &dyn HistoricalDataProvider,
    asset: &str,
    lookback_days: u32,
    fetch: &FetchConfig,
) -> DataResult<PriceSeries> {
    let attempts = fetch.retries + 1;
    let timeout = Duration::from_millis(fetch.timeout_ms);
    let mut last_error = DataError::Empty(asset.to_string());

    for attempt in 1..=attempts {
        let result = match tokio::time::timeout(timeout, provider.series(asset, lookback_days)).await
        {
            Ok(result) => result,
            Err(_) => Err(DataError::Timeout(fetch.timeout_ms)),
        };

        match result {
            Ok(series) if series.is_empty() => return Err(DataError::Empty(asset.to_string())),
            Ok(series) => return Ok(series),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) => {
                log::warn!(
                    "{} fetch of {} failed (attempt {}/{}): {}",
                    provider.name(),
                    asset,
                    attempt,
                    attempts,
                    e
                );
                last_error = e;
                if attempt < attempts {
                    let backoff = fetch.backoff_ms.saturating_mul(attempt as u64);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
            }
        }
    }

    Err(last_error)
}

/// Supplies the reference series for a run
pub struct HistoryLoader {
    provider: Option<Arc<dyn HistoricalDataProvider>>,
    fetch: FetchConfig,
}

impl HistoryLoader {
    pub fn new(provider: Option<Arc<dyn HistoricalDataProvider>>, fetch: FetchConfig) -> Self {
        Self { provider, fetch }
    }

    /// Provider series when available, seeded synthetic history otherwise
    pub async fn load(&self, params: &SimulationParameters, seed: u64) -> (PriceSeries, DataSource) {
        let asset = params.market.reference_asset.as_str();
        let days = params.historical_data_days;

        let reason = match &self.provider {
            None => "no market data provider configured".to_string(),
            Some(provider) => match fetch_series(provider.as_ref(), asset, days, &self.fetch).await {
                Ok(series) => {
                    log::info!(
                        "Loaded {} days of {} history from {}",
                        series.len(),
                        asset,
                        provider.name()
                    );
                    let source = DataSource::Historical {
                        asset: asset.to_string(),
                        points: series.len(),
                    };
                    return (series, source);
                }
                Err(e) => e.to_string(),
            },
        };

        log::warn!("Using synthetic history for {}: {}", asset, reason);
        (
            synthetic_history(params, seed),
            DataSource::Synthetic { reason },
        )
    }
}
