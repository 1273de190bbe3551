//! Market data adapters
//!
//! Implementations of the `HistoricalDataProvider` port:
//!
//! - **CoinGeckoProvider**: REST client for a CoinGecko-compatible API
//! - **StaticProvider**: fixtures, optional delay, always-failing mode
//! - **CachingProvider**: memoizes another provider's successful responses

mod caching;
mod coingecko;
mod fixture;

pub use caching::CachingProvider;
pub use coingecko::{CoinGeckoConfig, CoinGeckoProvider, RestError};
pub use fixture::StaticProvider;
