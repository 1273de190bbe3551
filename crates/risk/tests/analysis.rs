//! End-to-end risk analysis over real Monte Carlo output

use tokenomics_core::{MarketScenario, RiskCategory, RiskLevel, SimulationParameters};
use tokenomics_engine::{MonteCarloConfig, run_monte_carlo, synthetic_history};
use tokenomics_risk::{
    AnalysisConfig, AnalysisMode, GiniMode, LEGACY_GINI, RiskAnalyzer, concentration_risk,
};

fn init_logging() {
    let _ = env_logger::try_init();
}

fn params(scenario: MarketScenario) -> SimulationParameters {
    let mut params = SimulationParameters {
        simulation_months: 24,
        iterations: 40,
        seed: Some(99),
        ..Default::default()
    };
    params.market.scenario = scenario;
    params
}

#[test]
fn test_concentration_always_in_unit_interval() {
    let params = SimulationParameters::default();
    for exp in -3..12 {
        let supply = 10f64.powi(exp);
        let c = concentration_risk(&params, supply);
        assert!((0.0..=1.0).contains(&c), "supply {supply} gave {c}");
    }
}

#[test]
fn test_full_rerun_analysis() {
    init_logging();
    let params = params(MarketScenario::Stable);
    let history = synthetic_history(&params, 99);
    let config = MonteCarloConfig::from_params(&params);
    let run = run_monte_carlo(&params, &history.prices, &config);

    let analyzer = RiskAnalyzer::new(AnalysisConfig {
        sensitivity_iterations: 10,
        ..Default::default()
    });
    let report = analyzer.analyze(&params, &history.prices, &run.aggregate, config.seed);

    let assessment = report.metrics.assessment.as_ref().unwrap();
    assert!((0.0..=100.0).contains(&assessment.score));
    assert_eq!(assessment.components.len(), RiskCategory::all().len());

    assert!(!report.metrics.sensitivity.is_empty());
    assert_eq!(report.metrics.stress_tests.len(), 5);
    for s in &report.metrics.sensitivity {
        assert!(s.price_impact_pct.is_finite());
        assert!(s.supply_impact_pct.is_finite());
        assert!(s.elasticity.is_finite());
        assert!(s.holders_impact_pct.is_finite());
    }
    let holders = report
        .metrics
        .sensitivity
        .iter()
        .find(|s| s.parameter == "Holder Growth")
        .unwrap();
    assert!(holders.holders_impact_pct > 0.0);
    let unlock = report
        .metrics
        .stress_tests
        .iter()
        .find(|s| s.scenario == "Mass Unlock")
        .unwrap();
    assert!(unlock.supply_impact_pct > 0.0);

    assert!((0.0..=1.0).contains(&report.distribution.concentration_risk));
    assert_ne!(report.distribution.gini_coefficient, LEGACY_GINI);
}

#[test]
fn test_severity_component_tracks_scenario() {
    init_logging();
    let analyzer = RiskAnalyzer::new(AnalysisConfig {
        mode: AnalysisMode::Skip,
        ..Default::default()
    });

    let severity = |scenario| {
        let p = params(scenario);
        let history = synthetic_history(&p, 1);
        let config = MonteCarloConfig::from_params(&p);
        let run = run_monte_carlo(&p, &history.prices, &config);
        let report = analyzer.analyze(&p, &history.prices, &run.aggregate, config.seed);
        assert!(report.metrics.sensitivity.is_empty());
        assert!(report.metrics.stress_tests.is_empty());
        report
            .metrics
            .assessment
            .unwrap()
            .components
            .into_iter()
            .find(|c| c.category == RiskCategory::ScenarioSeverity)
            .unwrap()
    };

    let crash = severity(MarketScenario::Crash);
    let bull = severity(MarketScenario::Bull);
    assert!(crash.score > bull.score);
    assert_eq!(crash.level, RiskLevel::Critical);
    assert_eq!(bull.level, RiskLevel::Low);
}

#[test]
fn test_legacy_mode_reproduces_fixed_output() {
    init_logging();
    let params = params(MarketScenario::Bear);
    let run = run_monte_carlo(&params, &[], &MonteCarloConfig::from_params(&params));

    let analyzer = RiskAnalyzer::new(AnalysisConfig {
        mode: AnalysisMode::Legacy,
        gini: GiniMode::Legacy,
        ..Default::default()
    });
    let report = analyzer.analyze(&params, &[], &run.aggregate, 99);

    assert_eq!(report.distribution.gini_coefficient, LEGACY_GINI);
    assert_eq!(report.metrics.stress_tests[0].scenario, "Market Crash (-50%)");
    assert_eq!(report.metrics.sensitivity[0].parameter, "Staking APY");
    assert!(report.metrics.assessment.is_some());
}
