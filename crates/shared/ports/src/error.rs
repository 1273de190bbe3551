use thiserror::Error;

/// Failure to obtain market data.
///
/// Never fatal to a simulation: callers substitute synthetic data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {code} - {message}")]
    Api { code: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),

    #[error("No data returned for {0}")]
    Empty(String),

    #[error("Unknown asset: {0}")]
    NotFound(String),
}

impl DataError {
    /// Worth retrying: network failures, timeouts, rate limits, server errors
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Api { code, .. } => *code == 429 || (500..600).contains(code),
            Self::Parse(_) | Self::Empty(_) | Self::NotFound(_) => false,
        }
    }
}

pub type DataResult<T> = std::result::Result<T, DataError>;
