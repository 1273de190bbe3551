//! Run configuration
//!
//! JSON file layout:
//! - `parameters`: the token economy being simulated
//! - `fetch`: timeout and retry policy for the reference series
//! - `market_data`: which provider serves that series
//! - `analysis`: sensitivity/stress mode and Gini handling
//!
//! Every section and field is optional; missing ones take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokenomics_core::SimulationParameters;
use tokenomics_market_data::CoinGeckoConfig;
use tokenomics_risk::AnalysisConfig;

use crate::error::ConfigError;

/// Root configuration of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub parameters: SimulationParameters,
    /// Enforce the external input ranges on top of the structural checks
    pub strict_input: bool,
    /// Worker threads for the Monte Carlo; 0 uses rayon's default
    pub max_concurrency: usize,
    pub fetch: FetchConfig,
    pub market_data: MarketDataConfig,
    pub analysis: AnalysisConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            parameters: SimulationParameters::default(),
            strict_input: true,
            max_concurrency: 0,
            fetch: FetchConfig::default(),
            market_data: MarketDataConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The embedded default configuration
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_json(include_str!("default_config.json"))
    }

    pub fn with_parameters(mut self, parameters: SimulationParameters) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Reference-series fetch policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-attempt timeout
    pub timeout_ms: u64,
    /// Extra attempts after the first, for transient failures only
    pub retries: u32,
    /// Delay before retry n is n × backoff
    pub backoff_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            retries: 2,
            backoff_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    CoinGecko,
    /// No provider; every run uses synthetic history
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub provider: ProviderKind,
    /// Memoize fetched series across runs of the same simulation
    pub cache: bool,
    pub coingecko: CoinGeckoConfig,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::CoinGecko,
            cache: true,
            coingecko: CoinGeckoConfig::default(),
        }
    }
}
