use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coins::CoinPair;

/// A quantity of a coin the user owns, used for portfolio valuation.
///
/// Holdings live in their own storage collection with a lifecycle
/// independent from tracked coins; the tracker only reads them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Coin symbol, e.g. "BTC"
    pub symbol: String,

    /// Currency the holding is valued in, e.g. "USD"
    pub currency: String,

    /// Quantity owned
    pub quantity: Decimal,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, currency: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            currency: currency.into(),
            quantity,
        }
    }

    /// The pair this holding is priced against.
    pub fn pair(&self) -> CoinPair {
        CoinPair::new(self.symbol.clone(), self.currency.clone())
    }
}
