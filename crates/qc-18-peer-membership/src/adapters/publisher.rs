//! Event publisher adapters.

use crate::events::MembershipEvent;
use crate::ports::MembershipEventPublisher;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Publisher that drops events, counting them.
#[derive(Debug, Default)]
pub struct NoOpEventPublisher {
    event_count: AtomicUsize,
}

impl NoOpEventPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events handed to this publisher.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.event_count.load(Ordering::SeqCst)
    }
}

impl MembershipEventPublisher for NoOpEventPublisher {
    fn publish(&self, _event: MembershipEvent) -> Result<(), String> {
        self.event_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory publisher that keeps every event, for tests and local tooling.
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<MembershipEvent>>,
}

impl InMemoryEventPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All published events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<MembershipEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl MembershipEventPublisher for InMemoryEventPublisher {
    fn publish(&self, event: MembershipEvent) -> Result<(), String> {
        self.events.lock().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Change;

    fn added(key: &str) -> MembershipEvent {
        MembershipEvent::applied(
            "10.0.0.9",
            Change::Added {
                public_key: key.into(),
                ip: "10.0.0.1".to_string(),
            },
            0,
        )
    }

    #[test]
    fn test_noop_counts_events() {
        let publisher = NoOpEventPublisher::new();
        publisher.publish(added("A")).unwrap();
        publisher.publish(added("B")).unwrap();

        assert_eq!(publisher.event_count(), 2);
    }

    #[test]
    fn test_in_memory_keeps_and_clears() {
        let publisher = InMemoryEventPublisher::new();
        publisher.publish(added("A")).unwrap();
        publisher.publish(added("B")).unwrap();

        assert_eq!(publisher.len(), 2);
        assert_eq!(publisher.events()[1], added("B"));

        publisher.clear();
        assert!(publisher.is_empty());
    }
}
