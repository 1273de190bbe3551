//! Tokenomics Risk Analysis
//!
//! Everything derived from an aggregated run rather than from a single
//! iteration:
//!
//! - **Distribution**: insider concentration, Gini, largest allocation
//! - **Scoring**: weighted 0-100 composite with per-category levels
//! - **Sensitivity**: one-at-a-time input perturbation, rerun and compared
//! - **Stress**: named extreme scenarios, rerun and compared
//! - **Legacy**: fixed tables for output compatibility
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       RiskAnalyzer                         │
//! │                                                            │
//! │  Aggregate ───► distribution ───► scoring ──► Assessment   │
//! │                                                            │
//! │  Params ──┬──► baseline rerun ─────────┐                   │
//! │           ├──► perturbed reruns ───────┼──► Sensitivity    │
//! │           └──► stressed reruns ────────┴──► Stress tests   │
//! │                                                            │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reruns share the run's seed and reference series, so every comparison is
//! made under the same random draws.

pub mod analyzer;
pub mod distribution;
pub mod legacy;
pub mod scoring;
pub mod sensitivity;
pub mod stress;

// Re-export main types
pub use analyzer::{AnalysisConfig, AnalysisMode, RiskAnalyzer, RiskReport};
pub use distribution::{
    GiniMode, LEGACY_GINI, concentration_risk, distribution_metrics, gini_coefficient,
};
pub use legacy::{legacy_sensitivity_table, legacy_stress_table};
pub use scoring::assess;
pub use sensitivity::{SensitivitySettings, SensitivityTarget, run_sensitivity};
pub use stress::{StressScenario, run_stress_tests};
