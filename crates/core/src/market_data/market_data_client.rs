//! [`PriceClient`] implementation over the CryptoCompare provider.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use coinwatch_market_data::{CoinInfo, CryptoCompareProvider, PairQuote};

use super::market_data_traits::PriceClient;
use crate::coins::{CoinCatalogEntry, CoinPair, TrackedCoin};
use crate::errors::Result;

/// Adapts the market-data crate's provider models to domain types.
pub struct MarketDataPriceClient {
    provider: CryptoCompareProvider,
}

impl Default for MarketDataPriceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataPriceClient {
    pub fn new() -> Self {
        Self {
            provider: CryptoCompareProvider::new(),
        }
    }

    pub fn with_provider(provider: CryptoCompareProvider) -> Self {
        Self { provider }
    }
}

fn catalog_entry_from_info(info: CoinInfo) -> CoinCatalogEntry {
    CoinCatalogEntry {
        symbol: info.symbol,
        name: info.name,
        image_url: info.image_url,
    }
}

fn tracked_coin_from_quote(quote: PairQuote) -> TrackedCoin {
    TrackedCoin {
        pair: CoinPair::new(quote.base, quote.quote),
        price: quote.price,
        change_pct_24h: quote.change_pct_24h,
        sort_order: 0,
        img_url: None,
        selected: false,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl PriceClient for MarketDataPriceClient {
    async fn fetch_catalog(&self) -> Result<Vec<CoinCatalogEntry>> {
        let catalog = self.provider.coin_list().await?;
        debug!("Fetched catalog with {} entries", catalog.len());
        Ok(catalog.into_iter().map(catalog_entry_from_info).collect())
    }

    async fn fetch_prices(
        &self,
        groups: &BTreeMap<String, BTreeSet<String>>,
    ) -> Result<Vec<TrackedCoin>> {
        let mut coins = Vec::new();
        for (quote_currency, base_symbols) in groups {
            let symbols: Vec<String> = base_symbols.iter().cloned().collect();
            let quotes = self
                .provider
                .price_multi_full(&symbols, quote_currency)
                .await?;
            coins.extend(quotes.into_iter().map(tracked_coin_from_quote));
        }
        debug!("Fetched {} live quotes", coins.len());
        Ok(coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tracked_coin_from_quote() {
        let coin = tracked_coin_from_quote(PairQuote {
            base: "BTC".into(),
            quote: "USD".into(),
            price: dec!(64000),
            change_pct_24h: dec!(-0.5),
        });

        assert_eq!(coin.pair, CoinPair::new("BTC", "USD"));
        assert_eq!(coin.price, dec!(64000));
        assert_eq!(coin.change_pct_24h, dec!(-0.5));
        assert!(!coin.selected);
        assert!(coin.img_url.is_none());
    }
}
