//! Coinwatch Core - Domain entities, services, and traits.
//!
//! This crate contains the coordination logic for the coin-list screen of
//! the Coinwatch tracker. It is storage- and UI-agnostic: the persistence
//! engine and the rendering layer plug in behind the [`coins::CoinStore`]
//! and [`tracker::CoinsView`] traits.

pub mod coins;
pub mod constants;
pub mod errors;
pub mod events;
pub mod holdings;
pub mod market_data;
pub mod tracker;
pub mod utils;

// Re-export common types
pub use coins::{CoinCatalogEntry, CoinPair, CoinStore, LivePrice, MemoryCoinStore, TrackedCoin};
pub use events::{EventBus, UiEvent};
pub use holdings::Holding;
pub use tracker::{ChangeColor, CoinTracker, CoinsView};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
