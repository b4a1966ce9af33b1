//! In-memory reference implementation of [`CoinStore`].

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::watch;

use super::coins_model::{CoinCatalogEntry, CoinPair, TrackedCoin};
use super::coins_traits::CoinStore;
use crate::errors::{Error, Result};
use crate::holdings::Holding;

/// In-memory [`CoinStore`] backed by `watch` channels.
///
/// This is the reference implementation used by tests and by embedders that
/// do not need durable persistence; a database-backed store implements the
/// same trait with identical change-stream semantics.
pub struct MemoryCoinStore {
    coins: RwLock<BTreeMap<CoinPair, TrackedCoin>>,
    catalog: RwLock<Vec<CoinCatalogEntry>>,
    coins_tx: watch::Sender<Vec<TrackedCoin>>,
    holdings_tx: watch::Sender<Vec<Holding>>,
}

impl Default for MemoryCoinStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCoinStore {
    pub fn new() -> Self {
        let (coins_tx, _) = watch::channel(Vec::new());
        let (holdings_tx, _) = watch::channel(Vec::new());
        Self {
            coins: RwLock::new(BTreeMap::new()),
            catalog: RwLock::new(Vec::new()),
            coins_tx,
            holdings_tx,
        }
    }

    /// Replaces the holdings collection and notifies observers. Holdings are
    /// managed by a different screen; the store only relays them.
    pub fn set_holdings(&self, holdings: Vec<Holding>) {
        self.holdings_tx.send_replace(holdings);
    }

    fn emit_coins(&self) -> Result<()> {
        let snapshot: Vec<TrackedCoin> = self
            .coins
            .read()
            .map_err(|e| Error::Storage(e.to_string()))?
            .values()
            .cloned()
            .collect();
        self.coins_tx.send_replace(snapshot);
        Ok(())
    }
}

#[async_trait]
impl CoinStore for MemoryCoinStore {
    fn observe_tracked_coins(&self) -> watch::Receiver<Vec<TrackedCoin>> {
        self.coins_tx.subscribe()
    }

    fn observe_holdings(&self) -> watch::Receiver<Vec<Holding>> {
        self.holdings_tx.subscribe()
    }

    async fn get_tracked_coins(&self) -> Result<Vec<TrackedCoin>> {
        Ok(self
            .coins
            .read()
            .map_err(|e| Error::Storage(e.to_string()))?
            .values()
            .cloned()
            .collect())
    }

    async fn save_tracked_coins(&self, coins: Vec<TrackedCoin>) -> Result<()> {
        {
            let mut stored = self
                .coins
                .write()
                .map_err(|e| Error::Storage(e.to_string()))?;
            for coin in coins {
                stored.insert(coin.pair.clone(), coin);
            }
        }
        self.emit_coins()
    }

    async fn delete_tracked_coins(&self, pairs: &[CoinPair]) -> Result<()> {
        {
            let mut stored = self
                .coins
                .write()
                .map_err(|e| Error::Storage(e.to_string()))?;
            for pair in pairs {
                stored.remove(pair);
            }
        }
        self.emit_coins()
    }

    async fn save_catalog(&self, entries: Vec<CoinCatalogEntry>) -> Result<()> {
        *self
            .catalog
            .write()
            .map_err(|e| Error::Storage(e.to_string()))? = entries;
        Ok(())
    }

    async fn get_catalog(&self) -> Result<Vec<CoinCatalogEntry>> {
        Ok(self
            .catalog
            .read()
            .map_err(|e| Error::Storage(e.to_string()))?
            .clone())
    }
}
