//! Stress Tests
//!
//! Named extreme scenarios, each a transformation of the parameter set that
//! is rerun through the Monte Carlo and compared with the baseline.

use serde::{Deserialize, Serialize};
use tokenomics_core::{MarketScenario, SimulationParameters, StressTestResult, Usd};
use tokenomics_engine::{MonteCarloOutput, drawdown_stats, run_monte_carlo};

use crate::sensitivity::{SensitivitySettings, final_state, percent_change};

/// Upper bound of the market multiplier after stressing
const MAX_MULTIPLIER: f64 = 3.0;

/// Upper bound of the volatility factor after stressing
const MAX_VOLATILITY: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressScenario {
    MarketCrash,
    ExtendedBearMarket,
    LiquidityCrisis,
    MassUnlock,
    VolatilitySpike,
}

impl StressScenario {
    pub fn all() -> [Self; 5] {
        [
            Self::MarketCrash,
            Self::ExtendedBearMarket,
            Self::LiquidityCrisis,
            Self::MassUnlock,
            Self::VolatilitySpike,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketCrash => "Market Crash",
            Self::ExtendedBearMarket => "Extended Bear Market",
            Self::LiquidityCrisis => "Liquidity Crisis",
            Self::MassUnlock => "Mass Unlock",
            Self::VolatilitySpike => "Volatility Spike",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MarketCrash => "Crash regime at twice the market multiplier",
            Self::ExtendedBearMarket => "Bear regime at twice the market multiplier",
            Self::LiquidityCrisis => "Liquidity cut to 20% and shrinking 5% per month",
            Self::MassUnlock => "Cliffs removed and initial unlocks doubled",
            Self::VolatilitySpike => "Volatility tripled",
        }
    }

    /// Stressed copy of `params`
    pub fn apply(&self, params: &SimulationParameters) -> SimulationParameters {
        let mut stressed = params.clone();
        match self {
            Self::MarketCrash => {
                stressed.market.scenario = MarketScenario::Crash;
                stressed.market.multiplier = (params.market.multiplier * 2.0).min(MAX_MULTIPLIER);
            }
            Self::ExtendedBearMarket => {
                stressed.market.scenario = MarketScenario::Bear;
                stressed.market.multiplier = (params.market.multiplier * 2.0).min(MAX_MULTIPLIER);
            }
            Self::LiquidityCrisis => {
                stressed.liquidity.initial_liquidity_usd = params.liquidity.initial_liquidity_usd * 0.2;
                stressed.liquidity.monthly_liquidity_growth = -0.05;
            }
            Self::MassUnlock => {
                for schedule in &mut stressed.vesting_schedules {
                    schedule.cliff_months = 0;
                    schedule.initial_unlock = (schedule.initial_unlock * 2.0).min(100.0);
                }
            }
            Self::VolatilitySpike => {
                stressed.market.volatility_factor =
                    (params.market.volatility_factor * 3.0).min(MAX_VOLATILITY);
            }
        }
        stressed
    }
}

/// Compare one stressed run against the baseline
pub fn stress_result(
    scenario: StressScenario,
    baseline: &MonteCarloOutput,
    stressed: &MonteCarloOutput,
) -> StressTestResult {
    let mean_prices: Vec<Usd> = stressed.aggregate.trajectory.iter().map(|s| s.price).collect();
    let drawdown = drawdown_stats(&mean_prices);
    let base_end = final_state(baseline);
    let stressed_end = final_state(stressed);

    StressTestResult {
        scenario: scenario.name().to_string(),
        description: scenario.description().to_string(),
        price_impact_pct: percent_change(
            baseline.aggregate.summary.final_price,
            stressed.aggregate.summary.final_price,
        ),
        liquidity_impact_pct: percent_change(base_end.liquidity_pool, stressed_end.liquidity_pool),
        supply_impact_pct: percent_change(
            baseline.aggregate.summary.final_supply,
            stressed.aggregate.summary.final_supply,
        ),
        market_cap_impact_pct: percent_change(base_end.market_cap, stressed_end.market_cap),
        max_drawdown: drawdown.max_drawdown,
        lowest_price: stressed.aggregate.summary.min_price,
        recovery_months: drawdown.recovery_months(),
    }
}

/// Rerun every stress scenario with the baseline's settings
pub fn run_stress_tests(
    params: &SimulationParameters,
    prices: &[Usd],
    baseline: &MonteCarloOutput,
    settings: &SensitivitySettings,
) -> Vec<StressTestResult> {
    StressScenario::all()
        .into_iter()
        .filter_map(|scenario| {
            let stressed_params = scenario.apply(params);
            if let Err(e) = settings.validator.validate(&stressed_params) {
                log::warn!("Skipping stress test {}: {}", scenario.name(), e);
                return None;
            }

            let stressed = run_monte_carlo(&stressed_params, prices, &settings.monte_carlo);
            let result = stress_result(scenario, baseline, &stressed);
            log::debug!(
                "Stress {}: price {:+.2}%, supply {:+.2}%, liquidity {:+.2}%, drawdown {:.1}%",
                result.scenario,
                result.price_impact_pct,
                result.supply_impact_pct,
                result.liquidity_impact_pct,
                result.max_drawdown * 100.0
            );
            Some(result)
        })
        .collect()
}
