use thiserror::Error;
use tokenomics_core::ValidationError;
use tokenomics_market_data::RestError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Market data client error: {0}")]
    MarketData(#[from] RestError),

    #[error("Simulation worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
