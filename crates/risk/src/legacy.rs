//! Fixed illustrative tables
//!
//! Earlier reports shipped constant sensitivity and stress tables keyed by
//! parameter name instead of rerunning the simulation. They are kept for
//! consumers that compare against that output; nothing here depends on the
//! simulated trajectory.

use tokenomics_core::{SensitivityResult, SimulationParameters, StressTestResult};

/// (parameter, price impact %, supply impact %)
const SENSITIVITY_ROWS: [(&str, f64, f64); 5] = [
    ("Staking APY", 8.5, -3.2),
    ("Token Burn Rate", 12.3, -5.8),
    ("Market Multiplier", 25.0, 0.0),
    ("Vesting Cliff", 6.7, -12.5),
    ("Initial Liquidity", 4.2, 0.0),
];

/// (scenario, price impact %, liquidity impact %, recovery months)
const STRESS_ROWS: [(&str, f64, f64, u32); 4] = [
    ("Market Crash (-50%)", -50.0, -60.0, 12),
    ("Regulatory Shock", -35.0, -40.0, 9),
    ("Whale Dump (5% supply)", -20.0, -25.0, 4),
    ("Liquidity Crisis", -30.0, -75.0, 6),
];

const LEGACY_DELTA: f64 = 0.2;

fn legacy_base_value(params: &SimulationParameters, parameter: &str) -> f64 {
    match parameter {
        "Staking APY" => params.utility.staking_apy,
        "Token Burn Rate" => params.utility.monthly_burn_rate,
        "Market Multiplier" => params.market.multiplier,
        "Vesting Cliff" => params
            .vesting_schedules
            .iter()
            .map(|s| s.cliff_months as f64)
            .fold(0.0, f64::max),
        "Initial Liquidity" => params.liquidity.initial_liquidity_usd,
        _ => 0.0,
    }
}

/// Pool depth scales linearly with the initial liquidity
fn legacy_liquidity_impact(parameter: &str) -> f64 {
    if parameter == "Initial Liquidity" {
        LEGACY_DELTA * 100.0
    } else {
        0.0
    }
}

/// Combined percent change of a product of two quantities
fn compound_pct(a_pct: f64, b_pct: f64) -> f64 {
    ((1.0 + a_pct / 100.0) * (1.0 + b_pct / 100.0) - 1.0) * 100.0
}

/// Constant sensitivity rows, base values filled from `params`
pub fn legacy_sensitivity_table(params: &SimulationParameters) -> Vec<SensitivityResult> {
    SENSITIVITY_ROWS
        .iter()
        .map(|&(parameter, price_impact_pct, supply_impact_pct)| {
            let base_value = legacy_base_value(params, parameter);
            SensitivityResult {
                parameter: parameter.to_string(),
                base_value,
                perturbed_value: base_value * (1.0 + LEGACY_DELTA),
                price_impact_pct,
                supply_impact_pct,
                market_cap_impact_pct: compound_pct(price_impact_pct, supply_impact_pct),
                liquidity_impact_pct: legacy_liquidity_impact(parameter),
                holders_impact_pct: 0.0,
                elasticity: price_impact_pct / (LEGACY_DELTA * 100.0),
            }
        })
        .collect()
}

/// Constant stress rows; drawdown mirrors the price impact, lowest price
/// applies it to the initial price
pub fn legacy_stress_table(params: &SimulationParameters) -> Vec<StressTestResult> {
    STRESS_ROWS
        .iter()
        .map(
            |&(scenario, price_impact_pct, liquidity_impact_pct, recovery)| StressTestResult {
                scenario: scenario.to_string(),
                description: format!("{scenario} (fixed estimate)"),
                price_impact_pct,
                liquidity_impact_pct,
                supply_impact_pct: 0.0,
                market_cap_impact_pct: price_impact_pct,
                max_drawdown: -price_impact_pct / 100.0,
                lowest_price: params.market.initial_price * (1.0 + price_impact_pct / 100.0),
                recovery_months: Some(recovery),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_fixed() {
        let mut a = SimulationParameters::default();
        let b = SimulationParameters::default();
        a.market.scenario = tokenomics_core::MarketScenario::Crash;

        let sa = legacy_sensitivity_table(&a);
        let sb = legacy_sensitivity_table(&b);
        assert_eq!(sa, sb);
        assert_eq!(sa[0].parameter, "Staking APY");
        assert_eq!(sa[0].price_impact_pct, 8.5);
    }

    #[test]
    fn test_stress_rows() {
        let params = SimulationParameters::default();
        let rows = legacy_stress_table(&params);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].scenario, "Market Crash (-50%)");
        assert!((rows[0].lowest_price - 0.05).abs() < 1e-12);
        assert_eq!(rows[0].recovery_months, Some(12));
    }

    #[test]
    fn test_vesting_cliff_base_is_longest_cliff() {
        let params = SimulationParameters::default();
        let cliff = legacy_sensitivity_table(&params)
            .into_iter()
            .find(|r| r.parameter == "Vesting Cliff")
            .unwrap();
        assert_eq!(cliff.base_value, 12.0);
    }

    #[test]
    fn test_every_row_carries_an_impact() {
        let params = SimulationParameters::default();
        let rows = legacy_sensitivity_table(&params);
        let liquidity = rows
            .iter()
            .find(|r| r.parameter == "Initial Liquidity")
            .unwrap();
        assert!((liquidity.liquidity_impact_pct - 20.0).abs() < 1e-12);

        let burn = rows.iter().find(|r| r.parameter == "Token Burn Rate").unwrap();
        let expected = (1.123 * 0.942 - 1.0) * 100.0;
        assert!((burn.market_cap_impact_pct - expected).abs() < 1e-9);

        for r in legacy_stress_table(&params) {
            assert_eq!(r.market_cap_impact_pct, r.price_impact_pct);
            assert!(r.price_impact_pct < 0.0);
        }
    }
}
