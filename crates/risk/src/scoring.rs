//! Composite Risk Score
//!
//! Five components, each `min(observed / threshold × 100, 100)`, combined
//! with the category weights into a 0-100 score:
//!
//! | Category          | Observed                                   | Weight |
//! |-------------------|--------------------------------------------|--------|
//! | Concentration     | insider share of final supply              | 0.25   |
//! | Liquidity         | min ratio / (final liquidity / market cap) | 0.20   |
//! | Volatility        | price std-dev / initial price              | 0.20   |
//! | Vesting density   | significant unlock months / months         | 0.15   |
//! | Scenario severity | severity × multiplier                      | 0.20   |

use tokenomics_core::{
    DistributionMetrics, MarketConditions, Month, RiskAssessment, RiskCategory, RiskComponent,
    RiskLevel, RiskThresholds, SimulationParameters, Trajectory, Usd,
};
use tokenomics_engine::Aggregate;
use tokenomics_engine::vesting::{initial_unlock_total, newly_vested};

/// `observed / threshold` as a 0-100 score
pub fn component_score(observed: f64, threshold: f64) -> f64 {
    if observed.is_nan() {
        return 0.0;
    }
    if threshold <= 0.0 {
        return if observed > 0.0 { 100.0 } else { 0.0 };
    }
    (observed / threshold * 100.0).clamp(0.0, 100.0)
}

pub fn concentration_score(concentration: f64, thresholds: &RiskThresholds) -> f64 {
    component_score(concentration, thresholds.max_concentration)
}

/// Shallow liquidity relative to market cap scores high; no liquidity at all is 100
pub fn liquidity_score(liquidity: Usd, market_cap: Usd, thresholds: &RiskThresholds) -> f64 {
    if liquidity <= 0.0 {
        return 100.0;
    }
    if market_cap <= 0.0 {
        return 0.0;
    }
    component_score(thresholds.min_liquidity_ratio, liquidity / market_cap)
}

pub fn volatility_score(volatility: f64, initial_price: Usd, thresholds: &RiskThresholds) -> f64 {
    if initial_price <= 0.0 {
        return 0.0;
    }
    component_score(volatility / initial_price, thresholds.max_volatility)
}

/// Tokens unlocked in `month`, month 0 including every initial unlock
fn month_unlock(params: &SimulationParameters, month: Month) -> f64 {
    let linear = newly_vested(&params.vesting_schedules, month);
    if month == 0 {
        linear + initial_unlock_total(&params.vesting_schedules)
    } else {
        linear
    }
}

/// Months whose unlock is at least `significant_unlock_pct` of that month's
/// circulating supply
pub fn significant_unlock_months(params: &SimulationParameters, trajectory: &Trajectory) -> usize {
    let pct = params.risk_thresholds.significant_unlock_pct;
    trajectory
        .iter()
        .filter(|state| state.circulating_supply > 0.0)
        .filter(|state| {
            let unlock = month_unlock(params, state.month);
            unlock > 0.0 && unlock / state.circulating_supply * 100.0 >= pct
        })
        .count()
}

pub fn vesting_density_score(params: &SimulationParameters, trajectory: &Trajectory) -> f64 {
    if trajectory.is_empty() {
        return 0.0;
    }
    let density = significant_unlock_months(params, trajectory) as f64 / trajectory.len() as f64;
    component_score(density, params.risk_thresholds.max_vesting_event_density)
}

pub fn scenario_severity_score(market: &MarketConditions, thresholds: &RiskThresholds) -> f64 {
    component_score(
        market.scenario.severity() * market.multiplier,
        thresholds.max_scenario_severity,
    )
}

fn component(category: RiskCategory, score: f64) -> RiskComponent {
    RiskComponent {
        category,
        score,
        weight: category.weight(),
        level: RiskLevel::from_score(score),
    }
}

/// Weighted composite over the aggregated run
pub fn assess(
    params: &SimulationParameters,
    aggregate: &Aggregate,
    distribution: &DistributionMetrics,
) -> RiskAssessment {
    let thresholds = &params.risk_thresholds;
    let (liquidity, market_cap) = aggregate
        .trajectory
        .last()
        .map(|s| (s.liquidity_pool, s.market_cap))
        .unwrap_or_default();

    let components: Vec<RiskComponent> = RiskCategory::all()
        .into_iter()
        .map(|category| {
            let score = match category {
                RiskCategory::Concentration => {
                    concentration_score(distribution.concentration_risk, thresholds)
                }
                RiskCategory::Liquidity => liquidity_score(liquidity, market_cap, thresholds),
                RiskCategory::Volatility => volatility_score(
                    aggregate.summary.volatility,
                    aggregate.summary.initial_price,
                    thresholds,
                ),
                RiskCategory::VestingDensity => {
                    vesting_density_score(params, &aggregate.trajectory)
                }
                RiskCategory::ScenarioSeverity => {
                    scenario_severity_score(&params.market, thresholds)
                }
            };
            component(category, score)
        })
        .collect();

    let score = components
        .iter()
        .map(|c| c.score * c.weight)
        .sum::<f64>()
        .clamp(0.0, 100.0);

    log::debug!("Composite risk score {:.1} ({})", score, RiskLevel::from_score(score));

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tokenomics_core::{MarketScenario, SimulationState, Summary, VestingSchedule};

    fn flat_trajectory(months: Month, supply: f64) -> Trajectory {
        (0..months)
            .map(|month| SimulationState {
                month,
                circulating_supply: supply,
                price: 1.0,
                market_cap: supply,
                liquidity_pool: supply * 0.2,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_component_score_saturates() {
        assert_relative_eq!(component_score(0.15, 0.30), 50.0);
        assert_eq!(component_score(0.9, 0.30), 100.0);
        assert_eq!(component_score(-1.0, 0.30), 0.0);
        assert_eq!(component_score(f64::NAN, 0.30), 0.0);
        assert_eq!(component_score(0.1, 0.0), 100.0);
        assert_eq!(component_score(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_liquidity_score() {
        let t = RiskThresholds::default();
        assert_eq!(liquidity_score(0.0, 1_000.0, &t), 100.0);
        // ratio 0.2 against a 0.1 minimum
        assert_relative_eq!(liquidity_score(200.0, 1_000.0, &t), 50.0);
        // ratio 0.05 is below the minimum
        assert_eq!(liquidity_score(50.0, 1_000.0, &t), 100.0);
        assert_eq!(liquidity_score(50.0, 0.0, &t), 0.0);
    }

    #[test]
    fn test_volatility_score() {
        let t = RiskThresholds::default();
        assert_relative_eq!(volatility_score(0.025, 0.10, &t), 50.0);
        assert_eq!(volatility_score(0.5, 0.0, &t), 0.0);
    }

    #[test]
    fn test_scenario_severity() {
        let t = RiskThresholds::default();
        let mut market = MarketConditions {
            scenario: MarketScenario::Crash,
            multiplier: 1.0,
            ..Default::default()
        };
        assert_relative_eq!(scenario_severity_score(&market, &t), 90.0);
        market.multiplier = 2.0;
        assert_eq!(scenario_severity_score(&market, &t), 100.0);
    }

    #[test]
    fn test_significant_unlock_months() {
        let params = SimulationParameters {
            max_supply: 1_000_000.0,
            vesting_schedules: vec![VestingSchedule::new("Team", 240_000.0, 2, 4, 0.0)],
            ..Default::default()
        };
        // 60k per month over months 3-6 against 1M circulating = 6%
        let trajectory = flat_trajectory(12, 1_000_000.0);
        assert_eq!(significant_unlock_months(&params, &trajectory), 4);
        // density 1/3 is over the 0.25 threshold
        assert_eq!(vesting_density_score(&params, &trajectory), 100.0);

        let longer = flat_trajectory(48, 1_000_000.0);
        assert_relative_eq!(
            vesting_density_score(&params, &longer),
            (4.0 / 48.0) / 0.25 * 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_initial_unlock_counts_at_month_zero() {
        let params = SimulationParameters {
            vesting_schedules: vec![VestingSchedule::new("Seed", 100_000.0, 24, 12, 50.0)],
            ..Default::default()
        };
        let trajectory = flat_trajectory(6, 1_000_000.0);
        assert_eq!(significant_unlock_months(&params, &trajectory), 1);
    }

    #[test]
    fn test_assess_weights_and_levels() {
        let params = SimulationParameters::default();
        let aggregate = Aggregate {
            trajectory: flat_trajectory(24, 500_000_000.0),
            summary: Summary {
                initial_price: 0.10,
                volatility: 0.01,
                ..Default::default()
            },
        };
        let distribution = DistributionMetrics {
            concentration_risk: 0.15,
            ..Default::default()
        };

        let assessment = assess(&params, &aggregate, &distribution);
        assert_eq!(assessment.components.len(), 5);

        let expected: f64 = assessment.components.iter().map(|c| c.score * c.weight).sum();
        assert_relative_eq!(assessment.score, expected);
        assert_eq!(assessment.level, RiskLevel::from_score(assessment.score));

        let concentration = &assessment.components[0];
        assert_eq!(concentration.category, RiskCategory::Concentration);
        assert_relative_eq!(concentration.score, 50.0);
        assert_eq!(concentration.level, RiskLevel::Medium);
    }
}
