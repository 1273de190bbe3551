//! Simulation Runner
//!
//! Drives one month-by-month trajectory for a single iteration. A pure
//! function of (parameters, reference prices, seed): all mutable state lives
//! on the stack of `run_iteration`, so iterations can run in parallel with
//! nothing shared but read-only borrows.
//!
//! Monthly transition:
//! 1. newly vested tokens enter circulation
//! 2. liquidity-mining emissions (bounded by the liquidity allocation)
//! 3. staking rewards (bounded by the staking-rewards allocation)
//! 4. burn
//! 5. price × (1 + drift), floored at `MIN_PRICE`
//! 6. derived metrics (market cap, FDV, holders, liquidity, volume, revenue)

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokenomics_core::{
    MIN_PRICE, Month, SimulationParameters, SimulationState, Tokens, Trajectory, Usd, UserMetrics,
};

use crate::market_effect::MarketEffectModel;
use crate::vesting;

/// Upper bound on the months reserved up front for one trajectory
const PREALLOCATED_MONTHS: usize = 1_200;

/// Compounded growth factor after `month + 1` months
fn compounded(rate: f64, month: Month) -> f64 {
    let exponent = i32::try_from(month).unwrap_or(i32::MAX).saturating_add(1);
    (1.0 + rate).powi(exponent)
}

/// Running totals of one iteration, owned by `run_iteration`
struct IterationState {
    circulating: Tokens,
    price: Usd,
    burned: Tokens,
    mining_emitted: Tokens,
    rewards_emitted: Tokens,
}

/// Run one complete trajectory with an RNG seeded from `seed`
pub fn run_iteration(params: &SimulationParameters, prices: &[Usd], seed: u64) -> Trajectory {
    let mut rng = StdRng::seed_from_u64(seed);
    run_iteration_with_rng(params, prices, &mut rng)
}

/// Run one complete trajectory drawing noise from `rng`
pub fn run_iteration_with_rng<R: Rng + ?Sized>(
    params: &SimulationParameters,
    prices: &[Usd],
    rng: &mut R,
) -> Trajectory {
    let model = MarketEffectModel::new(&params.market, prices);
    let months = params.simulation_months;
    let max_supply = params.max_supply;
    let initial_price = params.market.initial_price.max(MIN_PRICE);

    let mining_pool = params.distribution.liquidity * max_supply;
    let rewards_pool = params.distribution.staking_rewards * max_supply;
    let participation = params.behavior.staking_participation;

    let mut s = IterationState {
        circulating: params.initial_circulating_supply(),
        price: initial_price,
        burned: 0.0,
        mining_emitted: 0.0,
        rewards_emitted: 0.0,
    };

    let mut trajectory = Trajectory::with_capacity((months as usize).min(PREALLOCATED_MONTHS));

    for month in 0..months {
        // 1. Vesting
        s.circulating += vesting::newly_vested(&params.vesting_schedules, month);

        // 2. Liquidity mining
        let mining_rate = params.incentives.liquidity_mining_monthly;
        if mining_rate > 0.0 {
            let emission = (mining_pool * mining_rate)
                .min(mining_pool - s.mining_emitted)
                .max(0.0);
            s.mining_emitted += emission;
            s.circulating += emission;
        }

        // 3. Staking
        let (staked, staking_apy) = if params.utility.staking_enabled {
            let staked = s.circulating * participation;
            let apy = params.utility.staking_apy + params.incentives.staking_bonus_apy;
            let reward = (staked * apy / 12.0)
                .min(rewards_pool - s.rewards_emitted)
                .max(0.0);
            s.rewards_emitted += reward;
            s.circulating += reward;
            (staked, apy)
        } else {
            (0.0, 0.0)
        };

        // 4. Burn
        if params.utility.burn_enabled {
            let burn = s.circulating * params.utility.monthly_burn_rate;
            s.circulating -= burn;
            s.burned += burn;
        }
        s.circulating = s.circulating.clamp(0.0, max_supply);

        // 5. Price
        let drift = model.drift(month, rng);
        s.price = (s.price * (1.0 + drift)).max(MIN_PRICE);

        // 6. Derived metrics
        let market_cap = s.circulating * s.price;
        let holders = params.behavior.initial_holders
            * compounded(params.behavior.monthly_holder_growth, month);
        let users =
            params.protocol.initial_users * compounded(params.protocol.monthly_user_growth, month);
        let daily_volume = market_cap * params.liquidity.daily_volume_ratio;
        let liquidity_pool = params.liquidity.initial_liquidity_usd
            * compounded(params.liquidity.monthly_liquidity_growth, month)
            * (s.price / initial_price);
        let protocol_revenue = users * params.protocol.monthly_revenue_per_user
            + daily_volume * 30.0 * params.utility.protocol_fee_rate;

        let active_stakers = if params.utility.staking_enabled {
            holders * participation
        } else {
            0.0
        };
        let average_holding = if holders > 0.0 {
            s.circulating / holders
        } else {
            0.0
        };

        trajectory.push(SimulationState {
            month,
            circulating_supply: s.circulating,
            price: s.price,
            market_cap,
            fdv: max_supply * s.price,
            staked_tokens: staked,
            burned_tokens: s.burned,
            liquidity_pool,
            protocol_revenue,
            staking_apy,
            daily_volume,
            users: UserMetrics {
                active_stakers,
                total_holders: holders,
                average_holding,
            },
        });
    }

    log::trace!(
        "Iteration finished: {} months, final price {:.6}, supply {:.0}",
        months,
        s.price,
        s.circulating
    );

    trajectory
}
