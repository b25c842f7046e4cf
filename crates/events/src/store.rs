//! Logging event store.
//!
//! A passive subscriber that writes every published event to the log. Durable
//! persistence or forwarding to external messaging is a documented extension
//! point for the infrastructure layer; this store deliberately stops at
//! structured log lines.

use std::sync::mpsc::TryRecvError;

use crate::bus::{EventBus, Subscription};
use crate::event::DomainEvent;

/// Subscriber that logs the type name and occurrence timestamp of every event
/// delivered to it.
///
/// Listens on the abstract [`DomainEvent`] capability, so a single store works
/// for any event family published on its bus.
pub struct EventStore<E> {
    subscription: Subscription<E>,
}

impl<E> EventStore<E>
where
    E: DomainEvent,
{
    /// Attach a new store to the given bus.
    pub fn attach<B>(bus: &B) -> Self
    where
        B: EventBus<E> + ?Sized,
    {
        Self {
            subscription: bus.subscribe(),
        }
    }

    /// Log every event delivered since the last drain; returns the count.
    pub fn drain(&self) -> usize {
        let mut stored = 0;
        loop {
            match self.subscription.try_recv() {
                Ok(event) => {
                    tracing::info!(
                        event_type = event.event_type(),
                        occurred_at = %event.occurred_at(),
                        "domain event stored"
                    );
                    stored += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};

    use crate::in_memory_bus::InMemoryEventBus;

    #[derive(Debug, Clone)]
    struct Noted {
        occurred_at: DateTime<Utc>,
    }

    impl DomainEvent for Noted {
        fn event_type(&self) -> &'static str {
            "test.noted"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.occurred_at
        }
    }

    #[test]
    fn drain_counts_every_delivered_event() {
        let bus = InMemoryEventBus::new();
        let store = EventStore::attach(&bus);

        for _ in 0..3 {
            bus.publish(Noted {
                occurred_at: Utc::now(),
            })
            .unwrap();
        }

        assert_eq!(store.drain(), 3);
        // Nothing left once drained.
        assert_eq!(store.drain(), 0);
    }

    #[test]
    fn store_only_sees_events_published_after_attach() {
        let bus = InMemoryEventBus::new();
        bus.publish(Noted {
            occurred_at: Utc::now(),
        })
        .unwrap();

        let store = EventStore::attach(&bus);
        assert_eq!(store.drain(), 0);
    }
}
