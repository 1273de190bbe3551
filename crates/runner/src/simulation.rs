//! Simulation - full run orchestration
//!
//! Ties together:
//! - parameter validation
//! - reference series loading (with synthetic fallback)
//! - the Monte Carlo, on a blocking worker
//! - risk analysis over the aggregated run
//! - vesting outlook and run metadata

use chrono::Utc;
use std::sync::Arc;
use tokenomics_core::{SimulationParameters, SimulationResult};
use tokenomics_engine::vesting::{vesting_events, vesting_summary};
use tokenomics_engine::{IterationPool, MonteCarloConfig, ParameterValidator, run_monte_carlo};
use tokenomics_market_data::{CachingProvider, CoinGeckoProvider};
use tokenomics_ports::HistoricalDataProvider;
use tokenomics_risk::RiskAnalyzer;
use uuid::Uuid;

use crate::config::{ProviderKind, SimulationConfig};
use crate::error::{Result, SimulationError};
use crate::history::HistoryLoader;

/// Full tokenomics simulation
pub struct TokenomicsSimulation {
    config: SimulationConfig,
    provider: Option<Arc<dyn HistoricalDataProvider>>,
    /// Built once, shared by every run and rerun
    pool: IterationPool,
}

impl TokenomicsSimulation {
    /// Simulation without a market data provider (synthetic history only)
    pub fn new(config: SimulationConfig) -> Self {
        let pool = IterationPool::bounded(config.max_concurrency);
        Self {
            config,
            provider: None,
            pool,
        }
    }

    /// Simulation with the provider described by `config.market_data`
    pub fn from_config(config: SimulationConfig) -> Result<Self> {
        let provider: Option<Arc<dyn HistoricalDataProvider>> = match config.market_data.provider {
            ProviderKind::Offline => None,
            ProviderKind::CoinGecko => {
                let client = CoinGeckoProvider::new(config.market_data.coingecko.clone())?;
                if config.market_data.cache {
                    Some(Arc::new(CachingProvider::new(client)))
                } else {
                    Some(Arc::new(client))
                }
            }
        };

        let mut sim = Self::new(config);
        sim.provider = provider;
        Ok(sim)
    }

    /// Replace the market data provider
    pub fn with_provider(mut self, provider: Arc<dyn HistoricalDataProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn validator(&self) -> ParameterValidator {
        if self.config.strict_input {
            ParameterValidator::strict()
        } else {
            ParameterValidator::structural()
        }
    }

    /// Run with the configured parameters
    pub async fn run(&self) -> Result<SimulationResult> {
        self.run_with(self.config.parameters.clone()).await
    }

    /// Run with `params` in place of the configured parameters
    pub async fn run_with(&self, params: SimulationParameters) -> Result<SimulationResult> {
        let validator = self.validator();
        let params = validator.accept(params)?;
        let seed = params.seed.unwrap_or_else(rand::random);

        log::info!(
            "Starting simulation: {} iterations x {} months, {} scenario, seed {}",
            params.iterations,
            params.simulation_months,
            params.market.scenario,
            seed
        );

        let loader = HistoryLoader::new(self.provider.clone(), self.config.fetch.clone());
        let (history, data_source) = loader.load(&params, seed).await;

        let monte_carlo = MonteCarloConfig::from_params(&params)
            .with_seed(seed)
            .with_pool(self.pool.clone());
        let analyzer = RiskAnalyzer::new(self.config.analysis.clone())
            .with_validator(validator)
            .with_pool(self.pool.clone());

        // CPU-bound from here on
        let (params, output, report) = tokio::task::spawn_blocking(move || {
            let output = run_monte_carlo(&params, &history.prices, &monte_carlo);
            let report = analyzer.analyze(&params, &history.prices, &output.aggregate, seed);
            (params, output, report)
        })
        .await
        .map_err(|e| SimulationError::Worker(e.to_string()))?;

        let summary = output.aggregate.summary;
        log::info!(
            "Simulation complete: final price {:.6} ({:+.2}%), max drawdown {:.1}%",
            summary.final_price,
            summary.total_return,
            summary.max_drawdown * 100.0
        );

        Ok(SimulationResult {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            seed,
            iterations: params.iterations,
            trajectory: output.aggregate.trajectory,
            summary,
            distribution: report.distribution,
            risk: report.metrics,
            vesting_events: vesting_events(&params.vesting_schedules, params.simulation_months),
            vesting_summary: vesting_summary(&params.vesting_schedules, params.simulation_months),
            data_source,
        })
    }
}
