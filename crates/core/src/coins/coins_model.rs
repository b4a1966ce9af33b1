//! Tracked coin and catalog models.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a tracked pair: base symbol quoted in a target currency.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct CoinPair {
    /// Base symbol, e.g. "BTC"
    pub base: String,

    /// Quote currency, e.g. "USD"
    pub quote: String,
}

impl CoinPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }
}

impl fmt::Display for CoinPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A coin pair the user has chosen to monitor, with its latest known quote.
///
/// Price and image fields always reflect the last successful fetch; a failed
/// refresh leaves them untouched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedCoin {
    pub pair: CoinPair,

    /// Latest known price of one unit of `pair.base` in `pair.quote`
    pub price: Decimal,

    /// Percent change over the last 24 hours
    pub change_pct_24h: Decimal,

    /// Display position in the coin list
    pub sort_order: i32,

    /// Icon URL, backfilled from the catalog by base symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,

    /// Multi-select flag, UI state only
    #[serde(default)]
    pub selected: bool,

    /// When the price was last successfully refreshed
    pub updated_at: DateTime<Utc>,
}

impl TrackedCoin {
    /// Creates a coin with no quote yet, as stored when the user first adds
    /// a pair to track.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            pair: CoinPair::new(base, quote),
            price: Decimal::ZERO,
            change_pct_24h: Decimal::ZERO,
            sort_order: 0,
            img_url: None,
            selected: false,
            updated_at: Utc::now(),
        }
    }
}

/// One entry of the catalog of coins supported by the remote price service.
///
/// Immutable once fetched; the catalog is replaced wholesale on every
/// successful catalog refresh.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoinCatalogEntry {
    pub symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Latest quote values for one pair, keyed by [`CoinPair`] in lookup maps.
#[derive(Clone, Debug, PartialEq)]
pub struct LivePrice {
    pub price: Decimal,
    pub change_pct_24h: Decimal,
}

/// Sorts the working set by base symbol ascending. Applied after every
/// mutation that changes membership or replaces the set.
pub fn sort_by_base(coins: &mut [TrackedCoin]) {
    coins.sort_by(|a, b| a.pair.base.cmp(&b.pair.base));
}

/// Groups the working set by quote currency for the price request: each
/// distinct quote currency maps to the set of base symbols needing a quote
/// against it, so symbols sharing a target currency ride one network call.
pub fn group_by_quote_currency(coins: &[TrackedCoin]) -> BTreeMap<String, BTreeSet<String>> {
    let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for coin in coins {
        groups
            .entry(coin.pair.quote.clone())
            .or_default()
            .insert(coin.pair.base.clone());
    }
    groups
}

/// Builds the pair → latest-quote map the holdings calculator consumes.
pub fn live_prices(coins: &[TrackedCoin]) -> HashMap<CoinPair, LivePrice> {
    coins
        .iter()
        .map(|coin| {
            (
                coin.pair.clone(),
                LivePrice {
                    price: coin.price,
                    change_pct_24h: coin.change_pct_24h,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(base: &str, quote: &str) -> TrackedCoin {
        TrackedCoin::new(base, quote)
    }

    #[test]
    fn test_sort_by_base_ascending() {
        let mut coins = vec![coin("XMR", "USD"), coin("BTC", "USD"), coin("ETH", "EUR")];
        sort_by_base(&mut coins);

        let order: Vec<&str> = coins.iter().map(|c| c.pair.base.as_str()).collect();
        assert_eq!(order, vec!["BTC", "ETH", "XMR"]);
    }

    #[test]
    fn test_group_by_quote_currency() {
        let coins = vec![coin("BTC", "USD"), coin("ETH", "USD"), coin("BTC", "EUR")];

        let groups = group_by_quote_currency(&coins);
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups["USD"],
            BTreeSet::from(["BTC".to_string(), "ETH".to_string()])
        );
        assert_eq!(groups["EUR"], BTreeSet::from(["BTC".to_string()]));
    }

    #[test]
    fn test_group_by_quote_currency_empty() {
        assert!(group_by_quote_currency(&[]).is_empty());
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(CoinPair::new("BTC", "USD").to_string(), "BTC/USD");
    }
}
