//! Monte Carlo fan-out
//!
//! Iterations are independent: each gets its own seed derived from the base
//! seed and its index, and borrows the parameters and reference prices
//! read-only. They run on an [`IterationPool`] built once and shared by every
//! run that uses it; results are collected in iteration order before
//! aggregation, so the outcome does not depend on the thread count.

use std::sync::Arc;

use rayon::prelude::*;
use tokenomics_core::{SimulationParameters, Trajectory, Usd, ValidationResult};

use crate::aggregator::{Aggregate, aggregate};
use crate::runner::run_iteration;
use crate::validation::ParameterValidator;

/// Worker pool the iterations run on
///
/// Either rayon's global pool or a bounded pool built once. Clones share the
/// same threads.
#[derive(Debug, Clone, Default)]
pub struct IterationPool {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl IterationPool {
    /// rayon's global pool
    pub fn global() -> Self {
        Self::default()
    }

    /// A pool of `max_concurrency` threads; 0 means the global pool
    pub fn bounded(max_concurrency: usize) -> Self {
        if max_concurrency == 0 {
            return Self::global();
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(max_concurrency)
            .thread_name(|i| format!("tokenomics-mc-{i}"))
            .build()
        {
            Ok(pool) => Self {
                pool: Some(Arc::new(pool)),
            },
            Err(e) => {
                log::warn!("Failed to build bounded thread pool ({e}), using global pool");
                Self::global()
            }
        }
    }

    pub fn is_global(&self) -> bool {
        self.pool.is_none()
    }

    /// Threads available to one run
    pub fn current_num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// True when both handles run on the same threads
    pub fn same_pool(&self, other: &Self) -> bool {
        match (&self.pool, &other.pool) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Run `op` inside the pool
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Monte Carlo run settings
#[derive(Debug, Clone)]
pub struct MonteCarloConfig {
    pub iterations: u32,
    /// Base seed; iteration seeds are derived from it
    pub seed: u64,
    pub pool: IterationPool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            seed: 42,
            pool: IterationPool::global(),
        }
    }
}

impl MonteCarloConfig {
    /// Settings taken from the parameter set (an unset seed becomes 42)
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            iterations: params.iterations,
            seed: params.seed.unwrap_or(42),
            ..Default::default()
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run on an existing pool
    pub fn with_pool(mut self, pool: IterationPool) -> Self {
        self.pool = pool;
        self
    }

    /// Build a dedicated pool of `max_concurrency` threads (0 = global)
    pub fn with_max_concurrency(self, max_concurrency: usize) -> Self {
        self.with_pool(IterationPool::bounded(max_concurrency))
    }
}

/// Aggregated ensemble plus per-iteration final prices
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonteCarloOutput {
    pub aggregate: Aggregate,
    pub final_prices: Vec<Usd>,
}

/// SplitMix64 step: decorrelates seeds of neighbouring iterations
pub fn iteration_seed(base: u64, index: u32) -> u64 {
    let mut z = base.wrapping_add((index as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn run_all(params: &SimulationParameters, prices: &[Usd], config: &MonteCarloConfig) -> Vec<Trajectory> {
    (0..config.iterations)
        .into_par_iter()
        .map(|i| run_iteration(params, prices, iteration_seed(config.seed, i)))
        .collect()
}

/// Run every iteration and aggregate. Parameters are assumed valid.
pub fn run_monte_carlo(
    params: &SimulationParameters,
    prices: &[Usd],
    config: &MonteCarloConfig,
) -> MonteCarloOutput {
    log::debug!(
        "Running {} iterations x {} months (seed {}, {} threads)",
        config.iterations,
        params.simulation_months,
        config.seed,
        config.pool.current_num_threads()
    );

    let trajectories = config.pool.install(|| run_all(params, prices, config));

    let final_prices = trajectories
        .iter()
        .filter_map(|t| t.last().map(|s| s.price))
        .collect();

    MonteCarloOutput {
        aggregate: aggregate(params.market.initial_price, &trajectories),
        final_prices,
    }
}

/// Validate, then run the Monte Carlo
pub fn simulate(
    params: &SimulationParameters,
    prices: &[Usd],
    config: &MonteCarloConfig,
) -> ValidationResult<MonteCarloOutput> {
    ParameterValidator::structural().validate(params)?;
    Ok(run_monte_carlo(params, prices, config))
}
