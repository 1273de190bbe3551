//! Distribution Metrics
//!
//! How concentrated the token is at the end of the horizon: insider share of
//! circulating supply, inequality of the allocation, largest single bucket.

use serde::{Deserialize, Serialize};
use tokenomics_core::{DistributionMetrics, SimulationParameters, TokenDistribution, Tokens};

/// Fixed Gini value reported by older tooling regardless of allocation shape
pub const LEGACY_GINI: f64 = 0.45;

/// How the Gini coefficient is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiniMode {
    /// Computed from the eight allocation fractions
    #[default]
    Computed,
    /// Always `LEGACY_GINI`, for output compatibility
    Legacy,
}

/// Team and advisor allocations as a share of `final_supply`, clamped to [0, 1]
pub fn concentration_risk(params: &SimulationParameters, final_supply: Tokens) -> f64 {
    if final_supply <= 0.0 || !final_supply.is_finite() {
        return 0.0;
    }
    (params.insider_tokens() / final_supply).clamp(0.0, 1.0)
}

/// Gini coefficient in mean-absolute-difference form
///
/// `G = Σᵢ Σⱼ |xᵢ - xⱼ| / (2 n² μ)`. Zero for a perfectly even split,
/// `1 - 1/n` when one bucket holds everything; 0 for empty or all-zero input.
pub fn gini_coefficient(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    if mean <= 0.0 {
        return 0.0;
    }

    let mut diff_sum = 0.0;
    for a in values {
        for b in values {
            diff_sum += (a - b).abs();
        }
    }
    diff_sum / (2.0 * (n * n) as f64 * mean)
}

/// Largest allocation bucket as a percent of max supply
pub fn top_holder_percentage(distribution: &TokenDistribution) -> f64 {
    distribution.largest() * 100.0
}

pub fn distribution_metrics(
    params: &SimulationParameters,
    final_supply: Tokens,
    mode: GiniMode,
) -> DistributionMetrics {
    let gini_coefficient = match mode {
        GiniMode::Computed => {
            let fractions: Vec<f64> = params
                .distribution
                .fractions()
                .iter()
                .map(|(_, v)| *v)
                .collect();
            gini_coefficient(&fractions)
        }
        GiniMode::Legacy => LEGACY_GINI,
    };

    DistributionMetrics {
        concentration_risk: concentration_risk(params, final_supply),
        gini_coefficient,
        top_holder_percentage: top_holder_percentage(&params.distribution),
    }
}
