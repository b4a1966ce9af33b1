//! Coin-list screen coordination.
//!
//! [`CoinTracker`] is the presenter behind the coin list: it owns the
//! working set of tracked coins, sequences catalog and price fetches,
//! merges results into storage, and reacts to change streams and
//! cross-component events. The render target plugs in behind [`CoinsView`].

mod tracker_service;
mod tracker_view;


pub use tracker_service::*;
pub use tracker_view::*;
