//! Event publication for registry changes.
//!
//! The registry only depends on [`EventPublisher`]. [`EventBus`] is the
//! default implementation: it wraps a [`tokio::sync::broadcast`] channel
//! that any number of observers subscribe to.

use tokio::sync::broadcast;

use super::RegistryEvent;
use crate::error::RegistryError;

/// Something the registry can hand a [`RegistryEvent`] to.
///
/// Dispatch is synchronous. Callers treat failures as non-fatal: a failed
/// publish is logged and the store mutation that caused it stands.
pub trait EventPublisher: Send + Sync + std::fmt::Debug {
    /// Publishes `event`, returning how many observers received it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Publish`] if the event could not be handed
    /// to the underlying channel.
    fn publish(&self, event: RegistryEvent) -> Result<usize, RegistryError>;
}

/// Broadcast bus for [`RegistryEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest events are dropped for
/// lagging receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RegistryEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Creates a new receiver that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventPublisher for EventBus {
    /// With no active receivers the event is dropped and `Ok(0)` returned.
    fn publish(&self, event: RegistryEvent) -> Result<usize, RegistryError> {
        Ok(self.sender.send(event).unwrap_or(0))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Application, ApplicationCandidate, ApplicationId, RegistrationKind};
    use chrono::Utc;

    fn make_event(id: &str) -> RegistryEvent {
        RegistryEvent::Registered {
            application: Application::from_candidate(
                ApplicationId::from(id),
                ApplicationCandidate::new("http://localhost:8080/health", "", "", "abc"),
            ),
            kind: RegistrationKind::Created,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn publish_without_receivers_returns_zero() {
        let bus = EventBus::new(16);
        let count = bus.publish(make_event("a"));
        assert!(matches!(count, Ok(0)));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let count = bus.publish(make_event("a"));
        assert!(matches!(count, Ok(2)));

        let Ok(e1) = rx1.recv().await else {
            panic!("rx1 failed");
        };
        let Ok(e2) = rx2.recv().await else {
            panic!("rx2 failed");
        };
        assert_eq!(e1.application_id(), e2.application_id());
        assert_eq!(e1.application_id().as_str(), "a");
    }

    #[test]
    fn receiver_count_tracks_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.receiver_count(), 0);

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        drop(rx1);
        assert_eq!(bus.receiver_count(), 1);
    }

    #[test]
    fn zero_capacity_is_usable() {
        let bus = EventBus::new(0);
        let _rx = bus.subscribe();
        assert!(matches!(bus.publish(make_event("a")), Ok(1)));
    }
}
