use serde::{Deserialize, Serialize};

use crate::coins::{CoinPair, TrackedCoin};

/// Semantic color for the holdings change-percent label.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeColor {
    Positive,
    Negative,
    Neutral,
}

/// Passive render target for the coin-list screen.
///
/// The tracker pushes commands; the view never calls back. Implementations
/// must be cheap and non-blocking, commands arrive on the tracker's own
/// tasks.
pub trait CoinsView: Send + Sync {
    /// Re-renders the coin list from the given working set snapshot.
    fn render(&self, coins: Vec<TrackedCoin>);

    /// Collapses the pull-to-refresh indicator.
    fn hide_refresh_spinner(&self);

    /// Enables or disables the swipe-to-refresh gesture.
    fn set_swipe_refresh_enabled(&self, enabled: bool);

    /// Shows or hides the holdings summary panel.
    fn enable_holdings_summary(&self, enabled: bool);

    fn set_holdings_value(&self, text: String);

    fn set_holdings_change_percent(&self, text: String, color: ChangeColor);

    /// Confirmation message after a delete action ("Coin deleted" /
    /// "Coins deleted").
    fn show_delete_confirmation(&self, message: String);

    /// Opens the detail screen for one pair.
    fn navigate_to_coin_detail(&self, pair: &CoinPair);

    /// Opens the contextual multi-select menu for a coin.
    fn show_selection_menu(&self, coin: &TrackedCoin);
}
