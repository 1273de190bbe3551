//! Tokenomics Ports
//!
//! Port definitions (traits) for the tokenomics simulator.
//! These define the boundaries between the simulation core and the
//! infrastructure that feeds it.

mod error;
mod market_data;

pub use error::{DataError, DataResult};
pub use market_data::{HistoricalDataProvider, MarketSnapshot, PriceSeries};
