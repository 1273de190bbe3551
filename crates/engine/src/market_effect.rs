//! Market Effect Model
//!
//! Produces the monthly price-drift fraction applied by the runner:
//!
//! ```text
//! drift(m) = base(scenario, m) × multiplier
//!          + Σ scheduled impacts at m / 100
//!          + U(-volatility/2, +volatility/2)
//!          + 0.3 × trailing 30-day change of the reference series at m × 30 days
//! ```
//!
//! The random term is drawn from the caller's RNG, so every (iteration,
//! month) pair gets an independent draw.

use rand::Rng;
use tokenomics_core::{MarketConditions, MarketScenario, Month, Usd};

/// Weight of the reference asset's trailing return in the drift
pub const HISTORICAL_INFLUENCE_WEIGHT: f64 = 0.3;

/// Days of reference history per simulated month
pub const DAYS_PER_MONTH: usize = 30;

/// Months the crash scenario stays in its drawdown phase
pub const CRASH_MONTHS: Month = 3;

/// Deterministic scenario drift before events and noise
pub fn base_drift(scenario: MarketScenario, multiplier: f64, month: Month) -> f64 {
    let base = match scenario {
        MarketScenario::Bull => 0.05,
        MarketScenario::Bear => -0.03,
        MarketScenario::Stable => 0.001,
        MarketScenario::Crash if month < CRASH_MONTHS => -0.15,
        MarketScenario::Crash => 0.02,
        MarketScenario::Custom => 0.0,
    };
    base * multiplier
}

/// Scenario drift, scheduled events, and a fresh uniform noise draw
pub fn scenario_drift<R: Rng + ?Sized>(market: &MarketConditions, month: Month, rng: &mut R) -> f64 {
    let mut drift = base_drift(market.scenario, market.multiplier, month);
    drift += market.event_impact(month) / 100.0;

    let half_width = market.volatility_factor / 2.0;
    if half_width > 0.0 {
        drift += rng.gen_range(-half_width..=half_width);
    }

    drift
}

/// Weighted trailing 30-day change of the reference series at `month × 30` days
///
/// Zero once `month × 30` runs past the end of the series: the history is
/// exhausted and stops contributing.
pub fn historical_influence(prices: &[Usd], month: Month) -> f64 {
    let idx = (month as usize).saturating_mul(DAYS_PER_MONTH);
    if idx >= prices.len() {
        return 0.0;
    }

    let prev = idx.saturating_sub(DAYS_PER_MONTH);
    if idx == prev {
        return 0.0;
    }

    let previous = prices[prev];
    if previous <= 0.0 || !previous.is_finite() {
        return 0.0;
    }

    (prices[idx] - previous) / previous * HISTORICAL_INFLUENCE_WEIGHT
}

/// Drift model bound to one market configuration and one reference series
#[derive(Debug, Clone, Copy)]
pub struct MarketEffectModel<'a> {
    market: &'a MarketConditions,
    prices: &'a [Usd],
}

impl<'a> MarketEffectModel<'a> {
    pub fn new(market: &'a MarketConditions, prices: &'a [Usd]) -> Self {
        Self { market, prices }
    }

    /// Full monthly drift: scenario term plus historical influence
    pub fn drift<R: Rng + ?Sized>(&self, month: Month, rng: &mut R) -> f64 {
        scenario_drift(self.market, month, rng) + historical_influence(self.prices, month)
    }

    pub fn market(&self) -> &MarketConditions {
        self.market
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tokenomics_core::ScheduledEvent;

    fn quiet(scenario: MarketScenario, multiplier: f64) -> MarketConditions {
        MarketConditions {
            scenario,
            multiplier,
            volatility_factor: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_base_drift_by_scenario() {
        assert_relative_eq!(base_drift(MarketScenario::Bull, 1.0, 0), 0.05);
        assert_relative_eq!(base_drift(MarketScenario::Bear, 2.0, 5), -0.06);
        assert_relative_eq!(base_drift(MarketScenario::Stable, 1.0, 0), 0.001);
        assert_relative_eq!(base_drift(MarketScenario::Custom, 3.0, 0), 0.0);
    }

    #[test]
    fn test_crash_recovers_after_three_months() {
        for month in 0..3 {
            assert_relative_eq!(base_drift(MarketScenario::Crash, 1.0, month), -0.15);
        }
        assert_relative_eq!(base_drift(MarketScenario::Crash, 1.0, 3), 0.02);
        assert_relative_eq!(base_drift(MarketScenario::Crash, 0.5, 10), 0.01);
    }

    #[test]
    fn test_scheduled_events_only_hit_their_month() {
        let mut market = quiet(MarketScenario::Custom, 1.0);
        market.events.push(ScheduledEvent::new(4, -25.0, "exchange hack"));
        let mut rng = StdRng::seed_from_u64(1);

        assert_relative_eq!(scenario_drift(&market, 4, &mut rng), -0.25);
        assert_relative_eq!(scenario_drift(&market, 5, &mut rng), 0.0);
    }

    #[test]
    fn test_noise_stays_within_half_width() {
        let mut market = quiet(MarketScenario::Stable, 1.0);
        market.volatility_factor = 0.4;
        let mut rng = StdRng::seed_from_u64(7);

        for month in 0..500 {
            let d = scenario_drift(&market, month, &mut rng) - 0.001;
            assert!((-0.2..=0.2).contains(&d), "noise {d} out of range");
        }
    }

    #[test]
    fn test_noise_is_redrawn() {
        let mut market = quiet(MarketScenario::Stable, 1.0);
        market.volatility_factor = 0.5;
        let mut rng = StdRng::seed_from_u64(3);

        let a = scenario_drift(&market, 1, &mut rng);
        let b = scenario_drift(&market, 1, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_historical_influence() {
        // Day 0 = 100, day 30 = 110, day 60 = 99
        let mut prices = vec![100.0; 61];
        prices[30] = 110.0;
        prices[60] = 99.0;

        assert_eq!(historical_influence(&prices, 0), 0.0);
        assert_relative_eq!(historical_influence(&prices, 1), 0.1 * 0.3, epsilon = 1e-12);
        assert_relative_eq!(historical_influence(&prices, 2), -0.1 * 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_historical_influence_zero_past_end() {
        let prices: Vec<f64> = (0..45).map(|d| 100.0 + d as f64).collect();
        // month 1 -> idx 30, prev 0
        assert_relative_eq!(historical_influence(&prices, 1), 0.30 * 0.3, epsilon = 1e-12);
        // month 2 -> idx 60 is past the last point
        for month in [2, 5, 35, 119] {
            assert_eq!(historical_influence(&prices, month), 0.0, "month {month}");
        }
    }

    #[test]
    fn test_historical_influence_last_window_not_repeated() {
        // 180 days, flat except a 10% rise over the last 30
        let mut prices = vec![100.0; 180];
        for (i, p) in prices.iter_mut().enumerate().skip(151) {
            *p = 100.0 + (i - 150) as f64 * 10.0 / 29.0;
        }

        // idx 150 is the last in-range lookup, and it sees the flat stretch
        assert_eq!(historical_influence(&prices, 5), 0.0);
        for month in 6..120 {
            assert_eq!(historical_influence(&prices, month), 0.0, "month {month}");
        }
    }

    #[test]
    fn test_historical_influence_guards() {
        assert_eq!(historical_influence(&[], 3), 0.0);
        assert_eq!(historical_influence(&[5.0], 3), 0.0);
        let zero_base = vec![0.0; 40];
        assert_eq!(historical_influence(&zero_base, 1), 0.0);
    }

    #[test]
    fn test_model_combines_terms() {
        let market = quiet(MarketScenario::Bull, 1.0);
        let mut prices = vec![100.0; 31];
        prices[30] = 120.0;
        let model = MarketEffectModel::new(&market, &prices);
        let mut rng = StdRng::seed_from_u64(0);

        assert_relative_eq!(model.drift(1, &mut rng), 0.05 + 0.2 * 0.3, epsilon = 1e-12);
    }
}
