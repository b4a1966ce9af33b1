use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::coins::{CoinCatalogEntry, TrackedCoin};
use crate::errors::Result;

/// Remote price service seam consumed by the tracker.
#[async_trait]
pub trait PriceClient: Send + Sync {
    /// Fetches the full catalog of supported coins with their metadata.
    async fn fetch_catalog(&self) -> Result<Vec<CoinCatalogEntry>>;

    /// Fetches live quotes for every requested pair. The request maps each
    /// quote currency to the base symbols needing a quote against it, so
    /// implementations can batch per target currency.
    ///
    /// Pairs the service does not know are absent from the result; an empty
    /// result is benign, not an error.
    async fn fetch_prices(
        &self,
        groups: &BTreeMap<String, BTreeSet<String>>,
    ) -> Result<Vec<TrackedCoin>>;
}
