//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching remote market data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The HTTP request failed or timed out.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with an error envelope instead of data.
    #[error("Provider error: {provider} - {message}")]
    Provider {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body could not be parsed into the expected shape.
    #[error("Failed to deserialize response: {0}")]
    Deserialization(String),
}

impl MarketDataError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
