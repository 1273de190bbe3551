//! Simulation input parameters
//!
//! Constructed once from validated input and never mutated afterwards.
//! Every struct deserializes with `#[serde(default)]` so configuration files
//! only need to spell out what differs from the defaults.

mod distribution;
mod market;
mod vesting;

pub use distribution::TokenDistribution;
pub use market::{MarketConditions, MarketScenario, ScheduledEvent};
pub use vesting::VestingSchedule;

use serde::{Deserialize, Serialize};

use crate::values::{Month, Tokens, Usd};

/// Liquidity pool and trading activity seeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidityDetails {
    /// Pool depth at listing
    pub initial_liquidity_usd: Usd,
    /// Monthly growth of pool depth (may be negative)
    pub monthly_liquidity_growth: f64,
    /// Daily trading volume as a fraction of market cap
    pub daily_volume_ratio: f64,
}

impl Default for LiquidityDetails {
    fn default() -> Self {
        Self {
            initial_liquidity_usd: 2_000_000.0,
            monthly_liquidity_growth: 0.02,
            daily_volume_ratio: 0.05,
        }
    }
}

/// Token utility flags and rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUtility {
    pub staking_enabled: bool,
    /// Base staking yield (fraction per year)
    pub staking_apy: f64,
    pub burn_enabled: bool,
    /// Fraction of circulating supply burned each month
    pub monthly_burn_rate: f64,
    /// Fraction of trading volume captured as protocol revenue
    pub protocol_fee_rate: f64,
}

impl Default for TokenUtility {
    fn default() -> Self {
        Self {
            staking_enabled: true,
            staking_apy: 0.12,
            burn_enabled: false,
            monthly_burn_rate: 0.0,
            protocol_fee_rate: 0.003,
        }
    }
}

/// Incentive programs layered on top of the base utility
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncentiveRates {
    /// Extra staking yield paid from the staking-rewards allocation
    pub staking_bonus_apy: f64,
    /// Fraction of the liquidity allocation emitted each month as mining rewards
    pub liquidity_mining_monthly: f64,
}

/// Holder behaviour assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehavioralHypotheses {
    /// Fraction of circulating supply staked
    pub staking_participation: f64,
    pub initial_holders: f64,
    /// Compounding monthly growth of the holder base
    pub monthly_holder_growth: f64,
}

impl Default for BehavioralHypotheses {
    fn default() -> Self {
        Self {
            staking_participation: 0.30,
            initial_holders: 5_000.0,
            monthly_holder_growth: 0.05,
        }
    }
}

/// Protocol usage seeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolUsage {
    pub initial_users: f64,
    pub monthly_user_growth: f64,
    pub monthly_revenue_per_user: Usd,
}

impl Default for ProtocolUsage {
    fn default() -> Self {
        Self {
            initial_users: 1_000.0,
            monthly_user_growth: 0.08,
            monthly_revenue_per_user: 2.0,
        }
    }
}

/// Thresholds the composite risk score measures against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Insider share of circulating supply considered fully risky
    pub max_concentration: f64,
    /// Minimum healthy liquidity / market-cap ratio
    pub min_liquidity_ratio: f64,
    /// Price std-dev relative to initial price considered fully risky
    pub max_volatility: f64,
    /// Unlock size (percent of circulating supply) that counts as significant
    pub significant_unlock_pct: f64,
    /// Significant unlock months per simulated month considered fully risky
    pub max_vesting_event_density: f64,
    /// Scenario severity × multiplier considered fully risky
    pub max_scenario_severity: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            max_concentration: 0.30,
            min_liquidity_ratio: 0.10,
            max_volatility: 0.50,
            significant_unlock_pct: 1.0,
            max_vesting_event_density: 0.25,
            max_scenario_severity: 1.0,
        }
    }
}

/// Full immutable input of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub distribution: TokenDistribution,
    pub max_supply: Tokens,
    pub vesting_schedules: Vec<VestingSchedule>,
    pub market: MarketConditions,
    pub liquidity: LiquidityDetails,
    pub utility: TokenUtility,
    pub incentives: IncentiveRates,
    pub behavior: BehavioralHypotheses,
    pub protocol: ProtocolUsage,
    pub risk_thresholds: RiskThresholds,
    pub simulation_months: Month,
    pub iterations: u32,
    pub historical_data_days: u32,
    /// Base seed; `None` draws one from entropy at run time
    pub seed: Option<u64>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        let max_supply = 1_000_000_000.0;
        let distribution = TokenDistribution::default();

        let vesting_schedules = vec![
            VestingSchedule::new("Team", distribution.team * max_supply, 12, 24, 0.0),
            VestingSchedule::new("Advisors", distribution.advisors * max_supply, 6, 18, 0.0),
            VestingSchedule::new("Ecosystem", distribution.ecosystem * max_supply, 0, 48, 5.0),
            VestingSchedule::new("Treasury", distribution.treasury * max_supply, 6, 36, 0.0),
            VestingSchedule::new("Marketing", distribution.marketing * max_supply, 0, 12, 10.0),
        ];

        Self {
            distribution,
            max_supply,
            vesting_schedules,
            market: MarketConditions::default(),
            liquidity: LiquidityDetails::default(),
            utility: TokenUtility::default(),
            incentives: IncentiveRates::default(),
            behavior: BehavioralHypotheses::default(),
            protocol: ProtocolUsage::default(),
            risk_thresholds: RiskThresholds::default(),
            simulation_months: 24,
            iterations: 100,
            historical_data_days: 180,
            seed: None,
        }
    }
}

impl SimulationParameters {
    /// Initial price shorthand
    pub fn initial_price(&self) -> Usd {
        self.market.initial_price
    }

    /// Tokens held by team and advisor schedules
    pub fn insider_tokens(&self) -> Tokens {
        self.vesting_schedules
            .iter()
            .filter(|s| s.is_insider())
            .map(|s| s.total_tokens)
            .sum()
    }

    /// Tokens circulating before month 0: public sale plus every initial unlock
    pub fn initial_circulating_supply(&self) -> Tokens {
        let unlocked: Tokens = self
            .vesting_schedules
            .iter()
            .map(VestingSchedule::initial_unlock_tokens)
            .sum();
        (self.distribution.public_sale * self.max_supply + unlocked).min(self.max_supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_initial_circulating_supply() {
        let params = SimulationParameters::default();
        // 200M public sale + 5% of 250M ecosystem + 10% of 50M marketing
        let expected = 200_000_000.0 + 12_500_000.0 + 5_000_000.0;
        assert!((params.initial_circulating_supply() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_insider_tokens() {
        let params = SimulationParameters::default();
        assert!((params.insider_tokens() - 200_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "max_supply": 5000000, "market": { "scenario": "bull" } }"#;
        let params: SimulationParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.max_supply, 5_000_000.0);
        assert_eq!(params.market.scenario, MarketScenario::Bull);
        assert_eq!(params.market.multiplier, 1.0);
        assert_eq!(params.simulation_months, 24);
    }
}
