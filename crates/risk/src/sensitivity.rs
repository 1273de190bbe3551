//! Sensitivity Analysis
//!
//! One input at a time is shifted by a relative delta and the Monte Carlo is
//! rerun with the baseline's seed and iteration count, so both runs see the
//! same random draws and the difference is attributable to the input alone.

use serde::{Deserialize, Serialize};
use tokenomics_core::{SensitivityResult, SimulationParameters, SimulationState, Usd};
use tokenomics_engine::{MonteCarloConfig, MonteCarloOutput, ParameterValidator, run_monte_carlo};

/// Inputs the sensitivity table covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityTarget {
    MarketMultiplier,
    VolatilityFactor,
    StakingApy,
    MonthlyBurnRate,
    HolderGrowth,
    InitialLiquidity,
}

impl SensitivityTarget {
    pub fn all() -> [Self; 6] {
        [
            Self::MarketMultiplier,
            Self::VolatilityFactor,
            Self::StakingApy,
            Self::MonthlyBurnRate,
            Self::HolderGrowth,
            Self::InitialLiquidity,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketMultiplier => "Market Multiplier",
            Self::VolatilityFactor => "Volatility Factor",
            Self::StakingApy => "Staking APY",
            Self::MonthlyBurnRate => "Monthly Burn Rate",
            Self::HolderGrowth => "Holder Growth",
            Self::InitialLiquidity => "Initial Liquidity",
        }
    }

    /// Current value in `params`
    pub fn value(&self, params: &SimulationParameters) -> f64 {
        match self {
            Self::MarketMultiplier => params.market.multiplier,
            Self::VolatilityFactor => params.market.volatility_factor,
            Self::StakingApy => params.utility.staking_apy,
            Self::MonthlyBurnRate => params.utility.monthly_burn_rate,
            Self::HolderGrowth => params.behavior.monthly_holder_growth,
            Self::InitialLiquidity => params.liquidity.initial_liquidity_usd,
        }
    }

    /// Copy of `params` with this input set to `value`
    pub fn apply(&self, params: &SimulationParameters, value: f64) -> SimulationParameters {
        let mut modified = params.clone();
        match self {
            Self::MarketMultiplier => modified.market.multiplier = value,
            Self::VolatilityFactor => modified.market.volatility_factor = value,
            Self::StakingApy => modified.utility.staking_apy = value,
            Self::MonthlyBurnRate => modified.utility.monthly_burn_rate = value,
            Self::HolderGrowth => modified.behavior.monthly_holder_growth = value,
            Self::InitialLiquidity => modified.liquidity.initial_liquidity_usd = value,
        }
        modified
    }
}

/// Rerun settings shared by the baseline and every perturbation
#[derive(Debug, Clone)]
pub struct SensitivitySettings {
    pub monte_carlo: MonteCarloConfig,
    /// Relative shift, e.g. 0.2 for +20%
    pub delta: f64,
    pub validator: ParameterValidator,
}

/// Percent change of `value` against `base`; 0 when the base is not positive
pub fn percent_change(base: f64, value: f64) -> f64 {
    if base <= 0.0 || !base.is_finite() {
        return 0.0;
    }
    (value - base) / base * 100.0
}

/// Last month of the mean trajectory; all zeros for an empty run
pub fn final_state(output: &MonteCarloOutput) -> SimulationState {
    output.aggregate.trajectory.last().copied().unwrap_or_default()
}

/// Compare one perturbed run against the baseline
pub fn sensitivity_result(
    target: SensitivityTarget,
    base_value: f64,
    perturbed_value: f64,
    delta: f64,
    baseline: &MonteCarloOutput,
    perturbed: &MonteCarloOutput,
) -> SensitivityResult {
    let base = &baseline.aggregate.summary;
    let shifted = &perturbed.aggregate.summary;

    let base_end = final_state(baseline);
    let shifted_end = final_state(perturbed);

    let price_impact_pct = percent_change(base.final_price, shifted.final_price);
    let supply_impact_pct = percent_change(base.final_supply, shifted.final_supply);
    let elasticity = if delta != 0.0 {
        price_impact_pct / (delta * 100.0)
    } else {
        0.0
    };

    SensitivityResult {
        parameter: target.name().to_string(),
        base_value,
        perturbed_value,
        price_impact_pct,
        supply_impact_pct,
        market_cap_impact_pct: percent_change(base_end.market_cap, shifted_end.market_cap),
        liquidity_impact_pct: percent_change(base_end.liquidity_pool, shifted_end.liquidity_pool),
        holders_impact_pct: percent_change(
            base_end.users.total_holders,
            shifted_end.users.total_holders,
        ),
        elasticity,
    }
}

/// Perturb each target in turn and measure the effect on the baseline
///
/// Targets at zero are skipped (a relative shift leaves them unchanged), as
/// are perturbations the validator rejects.
pub fn run_sensitivity(
    params: &SimulationParameters,
    prices: &[Usd],
    baseline: &MonteCarloOutput,
    settings: &SensitivitySettings,
) -> Vec<SensitivityResult> {
    let mut results = Vec::new();

    for target in SensitivityTarget::all() {
        let base_value = target.value(params);
        if base_value == 0.0 {
            log::debug!("Skipping sensitivity for {}: base value is zero", target.name());
            continue;
        }

        let perturbed_value = base_value * (1.0 + settings.delta);
        let modified = target.apply(params, perturbed_value);
        if let Err(e) = settings.validator.validate(&modified) {
            log::warn!(
                "Skipping sensitivity for {}: perturbed value {} is invalid ({})",
                target.name(),
                perturbed_value,
                e
            );
            continue;
        }

        let perturbed = run_monte_carlo(&modified, prices, &settings.monte_carlo);
        let result = sensitivity_result(
            target,
            base_value,
            perturbed_value,
            settings.delta,
            baseline,
            &perturbed,
        );
        log::debug!(
            "Sensitivity {}: price {:+.2}%, supply {:+.2}%, liquidity {:+.2}%, holders {:+.2}%",
            result.parameter,
            result.price_impact_pct,
            result.supply_impact_pct,
            result.liquidity_impact_pct,
            result.holders_impact_pct
        );
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settings(iterations: u32) -> SensitivitySettings {
        SensitivitySettings {
            monte_carlo: MonteCarloConfig::default()
                .with_iterations(iterations)
                .with_seed(17),
            delta: 0.2,
            validator: ParameterValidator::structural(),
        }
    }

    fn params() -> SimulationParameters {
        SimulationParameters {
            simulation_months: 12,
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_round_trips_value() {
        let p = params();
        for target in SensitivityTarget::all() {
            let modified = target.apply(&p, 0.42);
            assert_eq!(target.value(&modified), 0.42);
        }
    }

    #[test]
    fn test_percent_change_guards() {
        assert_relative_eq!(percent_change(2.0, 3.0), 50.0);
        assert_eq!(percent_change(0.0, 3.0), 0.0);
    }

    #[test]
    fn test_zero_targets_skipped() {
        let p = params();
        let s = settings(4);
        let baseline = run_monte_carlo(&p, &[], &s.monte_carlo);
        let results = run_sensitivity(&p, &[], &baseline, &s);

        // burn rate defaults to zero
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.parameter != "Monthly Burn Rate"));
        assert!(results.iter().all(|r| r.price_impact_pct.is_finite()));
    }

    #[test]
    fn test_invalid_perturbation_skipped() {
        let mut p = params();
        p.market.multiplier = 3.0;
        let mut s = settings(2);
        s.validator = ParameterValidator::strict();

        let baseline = run_monte_carlo(&p, &[], &s.monte_carlo);
        let results = run_sensitivity(&p, &[], &baseline, &s);
        assert!(results.iter().all(|r| r.parameter != "Market Multiplier"));
    }

    #[test]
    fn test_multiplier_moves_price_in_bull_market() {
        let mut p = params();
        p.market.scenario = tokenomics_core::MarketScenario::Bull;
        let s = settings(20);

        let baseline = run_monte_carlo(&p, &[], &s.monte_carlo);
        let results = run_sensitivity(&p, &[], &baseline, &s);
        let multiplier = results
            .iter()
            .find(|r| r.parameter == "Market Multiplier")
            .unwrap();

        assert_relative_eq!(multiplier.perturbed_value, 1.2);
        assert!(multiplier.price_impact_pct > 0.0);
        assert_relative_eq!(multiplier.elasticity, multiplier.price_impact_pct / 20.0);
    }

    #[test]
    fn test_liquidity_does_not_move_price() {
        let p = params();
        let s = settings(4);
        let baseline = run_monte_carlo(&p, &[], &s.monte_carlo);
        let results = run_sensitivity(&p, &[], &baseline, &s);
        let liquidity = results
            .iter()
            .find(|r| r.parameter == "Initial Liquidity")
            .unwrap();

        // Common random numbers: liquidity depth does not feed back into price
        assert_eq!(liquidity.price_impact_pct, 0.0);
        assert_relative_eq!(liquidity.liquidity_impact_pct, 20.0, max_relative = 1e-9);
    }

    #[test]
    fn test_holder_growth_moves_holders() {
        let p = params();
        let s = settings(4);
        let baseline = run_monte_carlo(&p, &[], &s.monte_carlo);
        let results = run_sensitivity(&p, &[], &baseline, &s);
        let growth = results
            .iter()
            .find(|r| r.parameter == "Holder Growth")
            .unwrap();

        assert_eq!(growth.price_impact_pct, 0.0);
        assert_eq!(growth.supply_impact_pct, 0.0);
        // 12 months of compounding at 6% instead of 5%
        let expected = (1.06_f64.powi(12) / 1.05_f64.powi(12) - 1.0) * 100.0;
        assert_relative_eq!(growth.holders_impact_pct, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_every_reported_row_moves_something() {
        let mut p = params();
        p.utility.monthly_burn_rate = 0.01;
        let s = settings(6);
        let baseline = run_monte_carlo(&p, &[], &s.monte_carlo);
        let results = run_sensitivity(&p, &[], &baseline, &s);

        assert_eq!(results.len(), SensitivityTarget::all().len());
        for r in &results {
            let impacts = [
                r.price_impact_pct,
                r.supply_impact_pct,
                r.market_cap_impact_pct,
                r.liquidity_impact_pct,
                r.holders_impact_pct,
            ];
            assert!(
                impacts.iter().any(|v| v.abs() > 1e-9),
                "{} reported no impact: {:?}",
                r.parameter,
                impacts
            );
        }
    }
}
