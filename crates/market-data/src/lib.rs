//! Coinwatch Market Data Crate
//!
//! Provider-facing market data fetching for the Coinwatch application.
//!
//! # Overview
//!
//! This crate knows how to talk to the remote price service
//! (CryptoCompare) and nothing else:
//! - [`CoinInfo`] - one entry of the full supported-coin catalog
//! - [`PairQuote`] - a live quote for one (base, quote-currency) pair
//! - [`CryptoCompareProvider`] - the HTTP client for both endpoints
//!
//! Domain concerns (which pairs a user tracks, persistence, merging) live
//! in `coinwatch-core`, which adapts these models to its own types.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{CoinInfo, PairQuote};
pub use provider::cryptocompare::CryptoCompareProvider;
