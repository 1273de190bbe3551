//! Tokenomics Core Domain
//!
//! Pure domain types for the tokenomics simulator: the immutable parameter
//! set, the per-month simulation state, and the aggregated result.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod error;
pub mod parameters;
pub mod result;
pub mod state;
pub mod values;

// Re-export commonly used types at crate root
pub use error::{ValidationError, ValidationResult};
pub use parameters::{
    BehavioralHypotheses,
    IncentiveRates,
    LiquidityDetails,
    // Market settings
    MarketConditions,
    MarketScenario,
    ProtocolUsage,
    RiskThresholds,
    ScheduledEvent,
    // Input root
    SimulationParameters,
    TokenDistribution,
    TokenUtility,
    VestingSchedule,
};
pub use result::{
    DataSource, DistributionMetrics, RiskAssessment, RiskCategory, RiskComponent, RiskLevel,
    RiskMetrics, SensitivityResult, SimulationResult, StressTestResult, Summary, VestingEvent,
    VestingGroupSummary,
};
pub use state::{SimulationState, Trajectory, UserMetrics};
pub use values::{DISTRIBUTION_EPSILON, MIN_PRICE, Month, RunId, Timestamp, Tokens, Usd};
