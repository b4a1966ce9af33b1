//! Provider-agnostic market data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry of the remote coin catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoinInfo {
    /// Ticker symbol, e.g. "BTC"
    pub symbol: String,

    /// Human-readable coin name, e.g. "Bitcoin"
    pub name: String,

    /// Absolute URL of the coin's icon, if the provider has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A live quote for one (base symbol, quote currency) pair.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PairQuote {
    /// Base symbol, e.g. "BTC"
    pub base: String,

    /// Quote currency, e.g. "USD"
    pub quote: String,

    /// Current price of one unit of `base` in `quote`
    pub price: Decimal,

    /// Percent change over the last 24 hours
    pub change_pct_24h: Decimal,
}
