/// Position of the coin-list page in the pager. Selection is discarded
/// whenever another page becomes active.
pub const COINS_PAGE_POSITION: i32 = 0;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Confirmation message after deleting a single coin
pub const MSG_COIN_DELETED: &str = "Coin deleted";

/// Confirmation message after deleting several coins
pub const MSG_COINS_DELETED: &str = "Coins deleted";
