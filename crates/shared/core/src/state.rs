use serde::{Deserialize, Serialize};

use crate::values::{Month, Tokens, Usd};

/// Holder-base metrics for one month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UserMetrics {
    pub active_stakers: f64,
    pub total_holders: f64,
    /// Circulating supply per holder
    pub average_holding: Tokens,
}

/// Snapshot of the token economy at the end of one month of one iteration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationState {
    pub month: Month,
    pub circulating_supply: Tokens,
    pub price: Usd,
    /// circulating_supply × price
    pub market_cap: Usd,
    /// max_supply × price
    pub fdv: Usd,
    pub staked_tokens: Tokens,
    /// Cumulative tokens burned so far
    pub burned_tokens: Tokens,
    /// Pool depth in dollars
    pub liquidity_pool: Usd,
    /// Revenue earned during this month
    pub protocol_revenue: Usd,
    pub staking_apy: f64,
    pub daily_volume: Usd,
    pub users: UserMetrics,
}

/// One state per simulated month, in month order
pub type Trajectory = Vec<SimulationState>;
