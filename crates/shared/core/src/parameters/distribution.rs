use serde::{Deserialize, Serialize};

/// Share of max supply allocated to each category.
///
/// All eight fractions must sum to 1.0 within `DISTRIBUTION_EPSILON`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenDistribution {
    pub public_sale: f64,
    pub team: f64,
    pub advisors: f64,
    pub ecosystem: f64,
    pub treasury: f64,
    pub liquidity: f64,
    pub staking_rewards: f64,
    pub marketing: f64,
}

impl Default for TokenDistribution {
    fn default() -> Self {
        Self {
            public_sale: 0.20,
            team: 0.15,
            advisors: 0.05,
            ecosystem: 0.25,
            treasury: 0.15,
            liquidity: 0.10,
            staking_rewards: 0.05,
            marketing: 0.05,
        }
    }
}

impl TokenDistribution {
    /// Named fractions in declaration order
    pub fn fractions(&self) -> [(&'static str, f64); 8] {
        [
            ("public_sale", self.public_sale),
            ("team", self.team),
            ("advisors", self.advisors),
            ("ecosystem", self.ecosystem),
            ("treasury", self.treasury),
            ("liquidity", self.liquidity),
            ("staking_rewards", self.staking_rewards),
            ("marketing", self.marketing),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.fractions().iter().map(|(_, f)| f).sum()
    }

    /// Largest single allocation fraction
    pub fn largest(&self) -> f64 {
        self.fractions()
            .iter()
            .map(|(_, f)| *f)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sums_to_one() {
        let d = TokenDistribution::default();
        assert!((d.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_largest() {
        let d = TokenDistribution::default();
        assert_eq!(d.largest(), 0.25);
    }
}
