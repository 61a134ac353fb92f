use crate::domain::DomainEvent;

/// Fire-and-forget event fan-out. Publishing must not fail the calling
/// engine; an implementation with no listeners simply drops the event.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: DomainEvent);
}
