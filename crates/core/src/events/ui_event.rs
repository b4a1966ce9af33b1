//! Cross-component event types.

use serde::{Deserialize, Serialize};

/// Events relayed between loosely related UI regions.
///
/// Publishers state facts ("list updated") or intents ("delete what is
/// selected"); subscribers decide what to do with them. No ownership is
/// implied between publisher and subscriber.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UiEvent {
    /// A price fetch started (`true`) or finished (`false`). Drives the
    /// shared loading indicator.
    CoinsLoading(bool),

    /// The tracked-coin list changed; other screens should re-query.
    TrackedListUpdated,

    /// The delete menu item was clicked; the coin list deletes whatever is
    /// currently multi-selected.
    DeleteSelectedRequested,

    /// A different pager page became active.
    PageChanged(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_event_serialization_round_trip() {
        let event = UiEvent::PageChanged(2);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("page_changed"));

        let back: UiEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
