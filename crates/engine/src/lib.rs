//! Tokenomics Engine - Monte Carlo projection of a token economy
//!
//! - **Validation**: structural and input-contract checks on parameters
//! - **Vesting**: per-month unlocks for every allocation group
//! - **Market Effect**: stochastic monthly drift plus historical influence
//! - **Synthetic History**: seeded fallback when no market data is available
//! - **Runner**: one month-by-month trajectory per iteration
//! - **Aggregator**: mean trajectory and ensemble summary
//! - **Monte Carlo**: bounded parallel fan-out of independent iterations
//!
//! ## Data Flow
//!
//! ```text
//!   SimulationParameters ──► validate ──┐
//!                                       │
//!   PriceSeries (historical/synthetic) ─┤
//!                                       ▼
//!            ┌──────────────────────────────────────────┐
//!            │  run_iteration(params, prices, seed_i)   │  × iterations
//!            │    vesting ─► supply                     │  (rayon pool)
//!            │    market effect ─► price                │
//!            │    derived metrics                       │
//!            └───────────────────┬──────────────────────┘
//!                                │ Vec<Trajectory>
//!                                ▼
//!                    aggregate ─► (mean Trajectory, Summary)
//! ```

pub mod aggregator;
pub mod market_effect;
pub mod monte_carlo;
pub mod runner;
pub mod synthetic;
pub mod validation;
pub mod vesting;

// Re-export main types
pub use aggregator::{Aggregate, DrawdownStats, aggregate, drawdown_stats};
pub use market_effect::MarketEffectModel;
pub use monte_carlo::{IterationPool, MonteCarloConfig, MonteCarloOutput, run_monte_carlo, simulate};
pub use runner::run_iteration;
pub use synthetic::synthetic_history;
pub use validation::ParameterValidator;
