//! Tokenomics Runner - end-to-end simulation runs
//!
//! - **Config**: JSON configuration with an embedded default
//! - **History**: reference series fetch with timeout, retry and fallback
//! - **Simulation**: validation, Monte Carlo, risk analysis, result assembly
//!
//! ## Architecture
//!
//! ```text
//!   SimulationConfig
//!          │
//!          ▼
//!   ParameterValidator ──✗──► SimulationError::Validation
//!          │
//!          ▼
//!   HistoryLoader ──► HistoricalDataProvider (timeout, retries)
//!          │                 │ error / empty
//!          │                 ▼
//!          │          synthetic_history
//!          ▼
//!   spawn_blocking ┌──────────────────────────────┐
//!                  │ run_monte_carlo (rayon pool) │
//!                  │ RiskAnalyzer::analyze        │
//!                  └──────────────┬───────────────┘
//!                                 ▼
//!                         SimulationResult
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod simulation;

// Re-export main types
pub use config::{FetchConfig, MarketDataConfig, ProviderKind, SimulationConfig};
pub use error::{ConfigError, Result, SimulationError};
pub use history::{HistoryLoader, fetch_series};
pub use simulation::TokenomicsSimulation;
