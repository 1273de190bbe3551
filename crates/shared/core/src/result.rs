//! Aggregated output of a full simulation run

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::state::Trajectory;
use crate::values::{Month, RunId, Timestamp, Tokens, Usd};

/// Scalar summary of the aggregated ensemble
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub initial_price: Usd,
    /// Mean of each iteration's last-month price
    pub final_price: Usd,
    /// Lowest price seen in any month of any iteration
    pub min_price: Usd,
    /// Highest price seen in any month of any iteration
    pub max_price: Usd,
    /// Percent
    pub total_return: f64,
    /// Percent
    pub annualized_return: f64,
    /// Population std-dev of every pooled per-iteration, per-month price
    pub volatility: f64,
    /// Largest peak-to-trough decline of the aggregated price path (0-1)
    pub max_drawdown: f64,
    pub final_supply: Tokens,
    pub final_market_cap: Usd,
    pub final_fdv: Usd,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DistributionMetrics {
    /// Insider share of final circulating supply, clamped to [0, 1]
    pub concentration_risk: f64,
    pub gini_coefficient: f64,
    /// Largest allocation category as a percent of max supply
    pub top_holder_percentage: f64,
}

/// Tokens unlocked for one group in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingEvent {
    pub month: Month,
    pub group: String,
    pub tokens: Tokens,
}

/// Vesting outlook of one group over the simulated horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingGroupSummary {
    pub group: String,
    pub total_tokens: Tokens,
    pub initial_unlock_tokens: Tokens,
    pub cliff_end_month: Month,
    pub fully_vested_month: Month,
    pub vested_by_horizon: Tokens,
    pub percent_vested_by_horizon: f64,
}

/// Impact of shifting one input parameter while holding the others fixed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub parameter: String,
    pub base_value: f64,
    pub perturbed_value: f64,
    /// Percent change in mean final price vs baseline
    pub price_impact_pct: f64,
    /// Percent change in final circulating supply vs baseline
    pub supply_impact_pct: f64,
    /// Percent change in final market cap vs baseline
    pub market_cap_impact_pct: f64,
    /// Percent change in final liquidity depth vs baseline
    pub liquidity_impact_pct: f64,
    /// Percent change in final holder count vs baseline
    pub holders_impact_pct: f64,
    /// price_impact_pct per percent of input change
    pub elasticity: f64,
}

/// Outcome of one extreme scenario rerun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressTestResult {
    pub scenario: String,
    pub description: String,
    /// Percent change in mean final price vs baseline
    pub price_impact_pct: f64,
    /// Percent change in final liquidity depth vs baseline
    pub liquidity_impact_pct: f64,
    /// Percent change in final circulating supply vs baseline
    pub supply_impact_pct: f64,
    /// Percent change in final market cap vs baseline
    pub market_cap_impact_pct: f64,
    pub max_drawdown: f64,
    pub lowest_price: Usd,
    /// Months from trough back to the pre-trough peak, if ever reached
    pub recovery_months: Option<Month>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Bucket a 0-100 score
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Critical
        } else if score >= 60.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else if score >= 20.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Concentration,
    Liquidity,
    Volatility,
    VestingDensity,
    ScenarioSeverity,
}

impl RiskCategory {
    /// Weight in the composite score; the five weights sum to 1
    pub fn weight(&self) -> f64 {
        match self {
            Self::Concentration => 0.25,
            Self::Liquidity => 0.20,
            Self::Volatility => 0.20,
            Self::VestingDensity => 0.15,
            Self::ScenarioSeverity => 0.20,
        }
    }

    pub fn all() -> [Self; 5] {
        [
            Self::Concentration,
            Self::Liquidity,
            Self::Volatility,
            Self::VestingDensity,
            Self::ScenarioSeverity,
        ]
    }
}

/// One weighted input of the composite risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskComponent {
    pub category: RiskCategory,
    /// 0-100
    pub score: f64,
    pub weight: f64,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Weighted 0-100 composite
    pub score: f64,
    pub level: RiskLevel,
    pub components: Vec<RiskComponent>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub stress_tests: Vec<StressTestResult>,
    pub sensitivity: Vec<SensitivityResult>,
    pub assessment: Option<RiskAssessment>,
}

/// Where the historical-influence series came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Historical { asset: String, points: usize },
    Synthetic { reason: String },
}

impl DataSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }
}

/// Everything a full run produces. Read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub run_id: RunId,
    pub generated_at: Timestamp,
    /// Effective base seed, for replaying the run
    pub seed: u64,
    pub iterations: u32,
    /// Per-field mean across iterations, one row per month
    pub trajectory: Trajectory,
    pub summary: Summary,
    pub distribution: DistributionMetrics,
    pub risk: RiskMetrics,
    pub vesting_events: Vec<VestingEvent>,
    pub vesting_summary: Vec<VestingGroupSummary>,
    pub data_source: DataSource,
}
