//! Synthetic Reference History
//!
//! When no market data can be fetched, the historical-influence term runs
//! against a seeded random walk built from the same scenario drift the
//! simulation uses. Generation never fails.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, LogNormal};
use tokenomics_core::{MIN_PRICE, Month, SimulationParameters};
use tokenomics_ports::PriceSeries;

use crate::market_effect::{DAYS_PER_MONTH, scenario_drift};

/// Dispersion of the daily volume noise (log-space std-dev)
const VOLUME_NOISE_SIGMA: f64 = 0.25;

/// Mixed into the run seed so the synthetic walk does not share a stream
/// with iteration 0
const SYNTHETIC_SEED_SALT: u64 = 0x5EED_0F_5A17_u64;

/// Upper bound on the days reserved up front for each series
const PREALLOCATED_DAYS: usize = 3_650;

/// Build `historical_data_days` daily points (at least one) starting at the
/// initial price, oldest first
pub fn synthetic_history(params: &SimulationParameters, seed: u64) -> PriceSeries {
    let days = params.historical_data_days.max(1) as usize;
    let mut rng = StdRng::seed_from_u64(seed ^ SYNTHETIC_SEED_SALT);

    let circulating = params.initial_circulating_supply();
    let volume_ratio = params.liquidity.daily_volume_ratio;
    // sigma is a positive constant, so construction cannot fail
    let volume_noise = LogNormal::new(0.0, VOLUME_NOISE_SIGMA).ok();

    let reserved = days.min(PREALLOCATED_DAYS);
    let mut prices = Vec::with_capacity(reserved);
    let mut market_caps = Vec::with_capacity(reserved);
    let mut volumes = Vec::with_capacity(reserved);

    let mut price = params.market.initial_price.max(MIN_PRICE);
    for day in 0..days {
        if day > 0 {
            let month = (day / DAYS_PER_MONTH) as Month;
            let daily = scenario_drift(&params.market, month, &mut rng) / DAYS_PER_MONTH as f64;
            price = (price * (1.0 + daily)).max(MIN_PRICE);
        }

        let market_cap = price * circulating;
        let noise = volume_noise
            .as_ref()
            .map(|d| d.sample(&mut rng))
            .unwrap_or(1.0);

        prices.push(price);
        market_caps.push(market_cap);
        volumes.push(market_cap * volume_ratio * noise);
    }

    log::debug!(
        "Generated synthetic history: {} days, {:.6} -> {:.6}",
        days,
        params.market.initial_price,
        price
    );

    PriceSeries::new(prices, market_caps, volumes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenomics_core::MarketScenario;

    #[test]
    fn test_length_and_start() {
        let params = SimulationParameters {
            historical_data_days: 90,
            ..Default::default()
        };
        let series = synthetic_history(&params, 42);

        assert_eq!(series.prices.len(), 90);
        assert_eq!(series.market_caps.len(), 90);
        assert_eq!(series.volumes.len(), 90);
        assert_eq!(series.prices[0], params.market.initial_price);
    }

    #[test]
    fn test_zero_days_still_yields_a_point() {
        let params = SimulationParameters {
            historical_data_days: 0,
            ..Default::default()
        };
        assert_eq!(synthetic_history(&params, 1).len(), 1);
    }

    #[test]
    fn test_series_longer_than_reservation() {
        let params = SimulationParameters {
            historical_data_days: PREALLOCATED_DAYS as u32 + 10,
            ..Default::default()
        };
        let series = synthetic_history(&params, 3);

        assert_eq!(series.prices.len(), PREALLOCATED_DAYS + 10);
        assert_eq!(series.volumes.len(), PREALLOCATED_DAYS + 10);
    }

    #[test]
    fn test_seeded_and_reproducible() {
        let params = SimulationParameters::default();
        assert_eq!(synthetic_history(&params, 9), synthetic_history(&params, 9));
        assert_ne!(
            synthetic_history(&params, 9).prices,
            synthetic_history(&params, 10).prices
        );
    }

    #[test]
    fn test_prices_positive_in_crash() {
        let mut params = SimulationParameters {
            historical_data_days: 364,
            ..Default::default()
        };
        params.market.scenario = MarketScenario::Crash;
        params.market.multiplier = 3.0;
        params.market.volatility_factor = 1.0;

        let series = synthetic_history(&params, 5);
        assert!(series.prices.iter().all(|p| *p > 0.0));
        assert!(series.volumes.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_follows_scenario_direction() {
        let mut params = SimulationParameters {
            historical_data_days: 180,
            ..Default::default()
        };
        params.market.volatility_factor = 0.0;

        params.market.scenario = MarketScenario::Bull;
        let bull = synthetic_history(&params, 1);
        params.market.scenario = MarketScenario::Bear;
        let bear = synthetic_history(&params, 1);

        assert!(bull.last_price().unwrap() > params.market.initial_price);
        assert!(bear.last_price().unwrap() < params.market.initial_price);
    }
}
