use async_trait::async_trait;
use tokio::sync::watch;

use super::coins_model::{CoinCatalogEntry, CoinPair, TrackedCoin};
use crate::errors::Result;
use crate::holdings::Holding;

/// Storage seam for tracked coins, holdings, and the coin catalog.
///
/// Change streams are `watch` channels: every subscriber immediately sees
/// the current value and then every subsequent change, with intermediate
/// values coalesced (last write wins). An empty sequence is a valid,
/// meaningful state, not an error.
#[async_trait]
pub trait CoinStore: Send + Sync {
    /// Stream of the full tracked-coin collection.
    fn observe_tracked_coins(&self) -> watch::Receiver<Vec<TrackedCoin>>;

    /// Stream of the full holdings collection.
    fn observe_holdings(&self) -> watch::Receiver<Vec<Holding>>;

    async fn get_tracked_coins(&self) -> Result<Vec<TrackedCoin>>;

    /// Upserts the given coins by pair; coins not mentioned are untouched.
    async fn save_tracked_coins(&self, coins: Vec<TrackedCoin>) -> Result<()>;

    /// Removes the given pairs from the tracked collection.
    async fn delete_tracked_coins(&self, pairs: &[CoinPair]) -> Result<()>;

    /// Replaces the stored catalog wholesale.
    async fn save_catalog(&self, entries: Vec<CoinCatalogEntry>) -> Result<()>;

    async fn get_catalog(&self) -> Result<Vec<CoinCatalogEntry>>;
}
