use tokio::sync::broadcast;

use crate::application::ports::EventPublisher;
use crate::domain::DomainEvent;

/// Fan-out event bus over a tokio broadcast channel. Subscribers that lag
/// past the channel capacity miss events; the engines never depend on
/// delivery.
pub struct BroadcastEventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl EventPublisher for BroadcastEventBus {
    fn publish(&self, event: DomainEvent) {
        // a send with no live subscribers returns Err; events are fire-and-forget
        let _ = self.sender.send(event);
    }
}
