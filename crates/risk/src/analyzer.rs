//! Risk Analyzer
//!
//! Facade tying the risk pieces to one aggregated run.

use serde::{Deserialize, Serialize};
use tokenomics_core::{DistributionMetrics, RiskMetrics, SimulationParameters, Usd};
use tokenomics_engine::{
    Aggregate, IterationPool, MonteCarloConfig, ParameterValidator, run_monte_carlo,
};

use crate::distribution::{GiniMode, distribution_metrics};
use crate::legacy::{legacy_sensitivity_table, legacy_stress_table};
use crate::scoring::assess;
use crate::sensitivity::{SensitivitySettings, run_sensitivity};
use crate::stress::run_stress_tests;

/// Source of the sensitivity and stress tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Perturb-and-rerun through the Monte Carlo
    #[default]
    Rerun,
    /// Fixed tables, for output compatibility
    Legacy,
    /// No sensitivity or stress tables
    Skip,
}

/// Analyzer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub mode: AnalysisMode,
    /// Iterations per rerun, capped at the run's own iteration count
    pub sensitivity_iterations: u32,
    /// Relative shift applied to each sensitivity target
    pub sensitivity_delta: f64,
    pub gini: GiniMode,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Rerun,
            sensitivity_iterations: 50,
            sensitivity_delta: 0.2,
            gini: GiniMode::Computed,
        }
    }
}

/// Distribution metrics and risk tables of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RiskReport {
    pub distribution: DistributionMetrics,
    pub metrics: RiskMetrics,
}

#[derive(Debug, Clone, Default)]
pub struct RiskAnalyzer {
    config: AnalysisConfig,
    validator: ParameterValidator,
    pool: IterationPool,
}

impl RiskAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            validator: ParameterValidator::structural(),
            pool: IterationPool::global(),
        }
    }

    /// Validator applied to perturbed and stressed parameter sets
    pub fn with_validator(mut self, validator: ParameterValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Pool the reruns share with the main run
    pub fn with_pool(mut self, pool: IterationPool) -> Self {
        self.pool = pool;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Settings for the baseline and every rerun
    pub fn rerun_settings(&self, params: &SimulationParameters, seed: u64) -> SensitivitySettings {
        let iterations = self
            .config
            .sensitivity_iterations
            .min(params.iterations)
            .max(1);
        SensitivitySettings {
            monte_carlo: MonteCarloConfig::default()
                .with_iterations(iterations)
                .with_seed(seed)
                .with_pool(self.pool.clone()),
            delta: self.config.sensitivity_delta,
            validator: self.validator,
        }
    }

    /// Analyze an aggregated run. `prices` and `seed` must be the ones the
    /// run used so reruns share its reference series and random draws.
    pub fn analyze(
        &self,
        params: &SimulationParameters,
        prices: &[Usd],
        aggregate: &Aggregate,
        seed: u64,
    ) -> RiskReport {
        let distribution =
            distribution_metrics(params, aggregate.summary.final_supply, self.config.gini);
        let assessment = assess(params, aggregate, &distribution);

        let (sensitivity, stress_tests) = match self.config.mode {
            AnalysisMode::Rerun => {
                let settings = self.rerun_settings(params, seed);
                log::info!(
                    "Running sensitivity and stress reruns ({} iterations each)",
                    settings.monte_carlo.iterations
                );
                let baseline = run_monte_carlo(params, prices, &settings.monte_carlo);
                (
                    run_sensitivity(params, prices, &baseline, &settings),
                    run_stress_tests(params, prices, &baseline, &settings),
                )
            }
            AnalysisMode::Legacy => (legacy_sensitivity_table(params), legacy_stress_table(params)),
            AnalysisMode::Skip => (Vec::new(), Vec::new()),
        };

        log::info!(
            "Risk score {:.1} ({}), concentration {:.3}, gini {:.3}",
            assessment.score,
            assessment.level,
            distribution.concentration_risk,
            distribution.gini_coefficient
        );

        RiskReport {
            distribution,
            metrics: RiskMetrics {
                stress_tests,
                sensitivity,
                assessment: Some(assessment),
            },
        }
    }
}
