//! CryptoCompare market data provider implementation.
//!
//! This module provides crypto market data from the CryptoCompare min-api:
//! - Full coin catalog via the `all/coinlist` endpoint
//! - Live pair quotes via the `pricemultifull` endpoint
//!
//! `pricemultifull` accepts a comma-separated list of base symbols per
//! request, so callers batch all symbols sharing a quote currency into a
//! single call.

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{CoinInfo, PairQuote};

const BASE_URL: &str = "https://min-api.cryptocompare.com";
const IMAGE_BASE_URL: &str = "https://www.cryptocompare.com";
const PROVIDER_ID: &str = "CRYPTOCOMPARE";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// CryptoCompare market data provider.
///
/// Stateless besides the underlying HTTP client; cloning is cheap.
#[derive(Clone)]
pub struct CryptoCompareProvider {
    client: Client,
    base_url: String,
}

// ============================================================================
// Response structures for the CryptoCompare API
// ============================================================================

/// `all/coinlist` response envelope
#[derive(Debug, Deserialize)]
struct CoinListResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "Data")]
    data: Option<HashMap<String, RawCoinInfo>>,
}

#[derive(Debug, Deserialize)]
struct RawCoinInfo {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CoinName")]
    coin_name: String,
    #[serde(rename = "ImageUrl")]
    image_url: Option<String>,
}

/// `pricemultifull` response envelope.
///
/// Successful responses carry a `RAW` map keyed by base symbol, then quote
/// currency; error responses carry `Response`/`Message` instead.
#[derive(Debug, Deserialize)]
struct PriceMultiFullResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "RAW")]
    raw: Option<HashMap<String, HashMap<String, RawPairQuote>>>,
}

#[derive(Debug, Deserialize)]
struct RawPairQuote {
    #[serde(rename = "PRICE")]
    price: Decimal,
    #[serde(rename = "CHANGEPCT24HOUR")]
    change_pct_24h: Option<Decimal>,
}

impl Default for CryptoCompareProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoCompareProvider {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (used by tests against a local server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut provider = Self::new();
        provider.base_url = base_url.into();
        provider
    }

    /// Fetches the full catalog of coins known to the provider.
    pub async fn coin_list(&self) -> Result<Vec<CoinInfo>, MarketDataError> {
        let url = format!("{}/data/all/coinlist", self.base_url);
        debug!("Fetching coin catalog from {}", url);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_coin_list(&body)
    }

    /// Fetches live quotes for every `base_symbols` entry against one quote
    /// currency. One HTTP request regardless of how many symbols are asked.
    ///
    /// Pairs the provider does not know are absent from the result rather
    /// than reported as errors.
    pub async fn price_multi_full(
        &self,
        base_symbols: &[String],
        quote_currency: &str,
    ) -> Result<Vec<PairQuote>, MarketDataError> {
        if base_symbols.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/data/pricemultifull", self.base_url);
        let fsyms = base_symbols.join(",");
        debug!("Fetching quotes for {} against {}", fsyms, quote_currency);
        let body = self
            .client
            .get(&url)
            .query(&[("fsyms", fsyms.as_str()), ("tsyms", quote_currency)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_price_multi_full(&body)
    }
}

fn parse_coin_list(body: &str) -> Result<Vec<CoinInfo>, MarketDataError> {
    let response: CoinListResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::Deserialization(e.to_string()))?;

    if response.response.as_deref() == Some("Error") {
        return Err(MarketDataError::provider(
            PROVIDER_ID,
            response.message.unwrap_or_else(|| "unknown error".into()),
        ));
    }

    let data = response.data.unwrap_or_default();
    let mut catalog: Vec<CoinInfo> = data
        .into_values()
        .map(|raw| CoinInfo {
            symbol: raw.name,
            name: raw.coin_name,
            image_url: raw
                .image_url
                .map(|path| format!("{}{}", IMAGE_BASE_URL, path)),
        })
        .collect();
    catalog.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    Ok(catalog)
}

fn parse_price_multi_full(body: &str) -> Result<Vec<PairQuote>, MarketDataError> {
    let response: PriceMultiFullResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::Deserialization(e.to_string()))?;

    if response.response.as_deref() == Some("Error") {
        return Err(MarketDataError::provider(
            PROVIDER_ID,
            response.message.unwrap_or_else(|| "unknown error".into()),
        ));
    }

    let raw = response.raw.unwrap_or_default();
    let mut quotes: Vec<PairQuote> = raw
        .into_iter()
        .flat_map(|(base, by_currency)| {
            by_currency.into_iter().map(move |(quote, raw_quote)| PairQuote {
                base: base.clone(),
                quote,
                price: raw_quote.price,
                change_pct_24h: raw_quote.change_pct_24h.unwrap_or_default(),
            })
        })
        .collect();
    quotes.sort_by(|a, b| (&a.base, &a.quote).cmp(&(&b.base, &b.quote)));
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_coin_list_success() {
        let body = r#"{
            "Response": "Success",
            "Data": {
                "BTC": {"Name": "BTC", "CoinName": "Bitcoin", "ImageUrl": "/media/37746251/btc.png"},
                "ETH": {"Name": "ETH", "CoinName": "Ethereum", "ImageUrl": "/media/37746238/eth.png"}
            }
        }"#;

        let catalog = parse_coin_list(body).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].symbol, "BTC");
        assert_eq!(catalog[0].name, "Bitcoin");
        assert_eq!(
            catalog[0].image_url.as_deref(),
            Some("https://www.cryptocompare.com/media/37746251/btc.png")
        );
    }

    #[test]
    fn test_parse_coin_list_missing_image() {
        let body = r#"{"Data": {"XMR": {"Name": "XMR", "CoinName": "Monero"}}}"#;

        let catalog = parse_coin_list(body).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog[0].image_url.is_none());
    }

    #[test]
    fn test_parse_coin_list_error_envelope() {
        let body = r#"{"Response": "Error", "Message": "rate limit exceeded"}"#;

        let err = parse_coin_list(body).unwrap_err();
        match err {
            MarketDataError::Provider { provider, message } => {
                assert_eq!(provider, "CRYPTOCOMPARE");
                assert_eq!(message, "rate limit exceeded");
            }
            other => panic!("Expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_price_multi_full() {
        let body = r#"{
            "RAW": {
                "BTC": {"USD": {"PRICE": 64250.5, "CHANGEPCT24HOUR": -1.25}},
                "ETH": {"USD": {"PRICE": 3120.0, "CHANGEPCT24HOUR": 2.5}}
            }
        }"#;

        let quotes = parse_price_multi_full(body).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].base, "BTC");
        assert_eq!(quotes[0].quote, "USD");
        assert_eq!(quotes[0].price, dec!(64250.5));
        assert_eq!(quotes[0].change_pct_24h, dec!(-1.25));
        assert_eq!(quotes[1].base, "ETH");
        assert_eq!(quotes[1].price, dec!(3120.0));
    }

    #[test]
    fn test_parse_price_multi_full_missing_change_defaults_to_zero() {
        let body = r#"{"RAW": {"BTC": {"EUR": {"PRICE": 59000}}}}"#;

        let quotes = parse_price_multi_full(body).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].change_pct_24h, Decimal::ZERO);
    }

    #[test]
    fn test_parse_price_multi_full_error_envelope() {
        let body = r#"{"Response": "Error", "Message": "fsyms param is empty"}"#;

        assert!(matches!(
            parse_price_multi_full(body),
            Err(MarketDataError::Provider { .. })
        ));
    }

    #[test]
    fn test_parse_price_multi_full_empty_raw() {
        let body = r#"{"RAW": {}}"#;

        let quotes = parse_price_multi_full(body).unwrap();
        assert!(quotes.is_empty());
    }
}
