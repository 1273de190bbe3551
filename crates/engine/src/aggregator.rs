//! Ensemble Aggregation
//!
//! Reduces N equal-length trajectories to:
//! - a mean trajectory (every numeric field averaged per month)
//! - a summary: final/min/max price, returns, pooled volatility, drawdown
//!
//! Min/max and volatility are taken over every month of every iteration;
//! drawdown is walked along the aggregated (mean) price path.

use tokenomics_core::{Month, SimulationState, Summary, Trajectory, Usd, UserMetrics};

/// Mean trajectory plus summary scalars
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregate {
    pub trajectory: Trajectory,
    pub summary: Summary,
}

/// Peak-to-trough statistics of a price path
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawdownStats {
    /// Largest fractional decline from a running peak (0-1)
    pub max_drawdown: f64,
    /// Index of the peak preceding the deepest trough
    pub peak_index: usize,
    /// Index of the deepest trough
    pub trough_index: usize,
    /// First index after the trough at which the peak is regained
    pub recovery_index: Option<usize>,
}

impl DrawdownStats {
    /// Months from trough to recovery, if the path recovered
    pub fn recovery_months(&self) -> Option<Month> {
        self.recovery_index
            .map(|r| (r - self.trough_index) as Month)
    }
}

/// Walk `prices` tracking the running peak
pub fn drawdown_stats(prices: &[Usd]) -> DrawdownStats {
    let mut stats = DrawdownStats::default();
    let Some(&first) = prices.first() else {
        return stats;
    };

    let mut peak = first;
    let mut peak_index = 0;

    for (i, &price) in prices.iter().enumerate() {
        if price > peak {
            peak = price;
            peak_index = i;
        } else if peak > 0.0 {
            let drawdown = (peak - price) / peak;
            if drawdown > stats.max_drawdown {
                stats.max_drawdown = drawdown;
                stats.peak_index = peak_index;
                stats.trough_index = i;
            }
        }
    }

    if stats.max_drawdown > 0.0 {
        let target = prices[stats.peak_index];
        stats.recovery_index = prices
            .iter()
            .enumerate()
            .skip(stats.trough_index + 1)
            .find(|(_, p)| **p >= target)
            .map(|(i, _)| i);
    }

    stats
}

/// Population standard deviation
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Percent total return compounded to a 12-month rate
pub fn annualized_return(total_return_pct: f64, months: usize) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let growth = 1.0 + total_return_pct / 100.0;
    if growth <= 0.0 {
        return -100.0;
    }
    (growth.powf(12.0 / months as f64) - 1.0) * 100.0
}

/// Field-wise running sum of states
#[derive(Default)]
struct StateSum {
    circulating_supply: f64,
    price: f64,
    market_cap: f64,
    fdv: f64,
    staked_tokens: f64,
    burned_tokens: f64,
    liquidity_pool: f64,
    protocol_revenue: f64,
    staking_apy: f64,
    daily_volume: f64,
    active_stakers: f64,
    total_holders: f64,
    average_holding: f64,
}

impl StateSum {
    fn add(&mut self, s: &SimulationState) {
        self.circulating_supply += s.circulating_supply;
        self.price += s.price;
        self.market_cap += s.market_cap;
        self.fdv += s.fdv;
        self.staked_tokens += s.staked_tokens;
        self.burned_tokens += s.burned_tokens;
        self.liquidity_pool += s.liquidity_pool;
        self.protocol_revenue += s.protocol_revenue;
        self.staking_apy += s.staking_apy;
        self.daily_volume += s.daily_volume;
        self.active_stakers += s.users.active_stakers;
        self.total_holders += s.users.total_holders;
        self.average_holding += s.users.average_holding;
    }

    fn mean(&self, month: Month, n: f64) -> SimulationState {
        SimulationState {
            month,
            circulating_supply: self.circulating_supply / n,
            price: self.price / n,
            market_cap: self.market_cap / n,
            fdv: self.fdv / n,
            staked_tokens: self.staked_tokens / n,
            burned_tokens: self.burned_tokens / n,
            liquidity_pool: self.liquidity_pool / n,
            protocol_revenue: self.protocol_revenue / n,
            staking_apy: self.staking_apy / n,
            daily_volume: self.daily_volume / n,
            users: UserMetrics {
                active_stakers: self.active_stakers / n,
                total_holders: self.total_holders / n,
                average_holding: self.average_holding / n,
            },
        }
    }
}

/// Per-month arithmetic mean of every numeric field
pub fn mean_trajectory(trajectories: &[Trajectory]) -> Trajectory {
    let Some(first) = trajectories.first() else {
        return Trajectory::new();
    };
    debug_assert!(
        trajectories.iter().all(|t| t.len() == first.len()),
        "trajectories must have equal length"
    );

    let months = trajectories.iter().map(Vec::len).min().unwrap_or(0);
    let n = trajectories.len() as f64;

    (0..months)
        .map(|m| {
            let mut sum = StateSum::default();
            for trajectory in trajectories {
                sum.add(&trajectory[m]);
            }
            sum.mean(first[m].month, n)
        })
        .collect()
}

/// Reduce all iteration trajectories into a mean trajectory and summary
pub fn aggregate(initial_price: Usd, trajectories: &[Trajectory]) -> Aggregate {
    let trajectory = mean_trajectory(trajectories);
    if trajectory.is_empty() {
        return Aggregate {
            trajectory,
            summary: Summary {
                initial_price,
                ..Default::default()
            },
        };
    }

    let final_prices: Vec<Usd> = trajectories
        .iter()
        .filter_map(|t| t.last().map(|s| s.price))
        .collect();
    let final_price = final_prices.iter().sum::<f64>() / final_prices.len() as f64;

    let pooled: Vec<Usd> = trajectories
        .iter()
        .flat_map(|t| t.iter().map(|s| s.price))
        .collect();
    let min_price = pooled.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = pooled.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let total_return = if initial_price > 0.0 {
        (final_price - initial_price) / initial_price * 100.0
    } else {
        0.0
    };

    let mean_prices: Vec<Usd> = trajectory.iter().map(|s| s.price).collect();
    let last = trajectory[trajectory.len() - 1];

    let summary = Summary {
        initial_price,
        final_price,
        min_price,
        max_price,
        total_return,
        annualized_return: annualized_return(total_return, trajectory.len()),
        volatility: population_std_dev(&pooled),
        max_drawdown: drawdown_stats(&mean_prices).max_drawdown,
        final_supply: last.circulating_supply,
        final_market_cap: last.market_cap,
        final_fdv: last.fdv,
    };

    Aggregate {
        trajectory,
        summary,
    }
}
