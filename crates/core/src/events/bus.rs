//! In-process publish/subscribe channel.

use tokio::sync::broadcast;

use super::ui_event::UiEvent;

const BUS_CAPACITY: usize = 64;

/// Fan-out event channel with independent subscriber lifetimes.
///
/// At-least-once per active subscriber, no persistence or replay: events
/// published while nobody listens are dropped, and a slow subscriber that
/// falls too far behind loses the oldest events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<UiEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    /// Publishes an event to all current subscribers. Publishing with no
    /// subscribers is a valid no-op.
    pub fn publish(&self, event: UiEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.publish(UiEvent::TrackedListUpdated);
    }

    #[tokio::test]
    async fn test_each_subscriber_sees_each_event() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(UiEvent::CoinsLoading(true));
        bus.publish(UiEvent::CoinsLoading(false));

        assert_eq!(first.recv().await.unwrap(), UiEvent::CoinsLoading(true));
        assert_eq!(first.recv().await.unwrap(), UiEvent::CoinsLoading(false));
        assert_eq!(second.recv().await.unwrap(), UiEvent::CoinsLoading(true));
        assert_eq!(second.recv().await.unwrap(), UiEvent::CoinsLoading(false));
    }

    #[tokio::test]
    async fn test_no_replay_for_late_subscribers() {
        let bus = EventBus::new();
        bus.publish(UiEvent::TrackedListUpdated);

        let mut late = bus.subscribe();
        bus.publish(UiEvent::PageChanged(1));
        assert_eq!(late.recv().await.unwrap(), UiEvent::PageChanged(1));
    }
}
