//! Core error types for the Coinwatch application.
//!
//! Storage-specific errors are converted to these types by whatever storage
//! backend implements the [`crate::coins::CoinStore`] trait, keeping this
//! crate database-agnostic.

use thiserror::Error;

use coinwatch_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the coin tracker.
#[derive(Error, Debug)]
pub enum Error {
    /// A storage read or write failed.
    #[error("Storage operation failed: {0}")]
    Storage(String),

    /// A remote market data call failed.
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// Holdings aggregation failed.
    #[error("Holdings calculation failed: {0}")]
    Calculation(String),

    /// Anything that does not fit the categories above.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
