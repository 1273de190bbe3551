use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Token quantity. Simulation math is continuous, so plain f64.
pub type Tokens = f64;

/// Dollar amount
pub type Usd = f64;

/// Month index, 0-based from the token generation event
pub type Month = u32;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Identifier of one full simulation run
pub type RunId = Uuid;

/// Tolerance on the sum of the eight distribution fractions
pub const DISTRIBUTION_EPSILON: f64 = 0.001;

/// Floor applied to token price after every monthly step
pub const MIN_PRICE: f64 = 1e-9;
