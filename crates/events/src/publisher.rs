//! Drains an aggregate's event buffer into the event bus.

use storefront_core::AggregateRoot;

use crate::bus::EventBus;
use crate::event::DomainEvent;

/// Publishes the domain events buffered on an aggregate root.
///
/// Injected into application services as an explicit dependency; there is no
/// process-global publisher. Services call [`publish_events`] once per unit of
/// work, after the business operation succeeded.
///
/// [`publish_events`]: DomainEventPublisher::publish_events
pub struct DomainEventPublisher<B> {
    bus: B,
}

impl<B> DomainEventPublisher<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Take every event currently buffered on `aggregate`, forward each one to
    /// the bus in recording order, and return how many were forwarded.
    ///
    /// The buffer is drained before forwarding starts, so it is empty
    /// afterwards no matter what the bus does. Publishing is fire-and-forget
    /// per event: a failure on one event is logged at `warn` and does not
    /// block delivery of the remaining events.
    pub fn publish_events<A>(&self, aggregate: &mut A) -> usize
    where
        A: AggregateRoot,
        A::Event: DomainEvent,
        B: EventBus<A::Event>,
    {
        let events = aggregate.take_events();
        if events.is_empty() {
            return 0;
        }

        let mut published = 0;
        for event in events {
            let event_type = event.event_type();
            match self.bus.publish(event) {
                Ok(()) => published += 1,
                Err(error) => {
                    tracing::warn!(event_type, ?error, "failed to publish domain event");
                }
            }
        }

        tracing::debug!(published, "domain events published");
        published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};
    use storefront_core::{CartId, DomainEvents, Entity};

    use crate::in_memory_bus::InMemoryEventBus;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Pinged {
        label: &'static str,
        occurred_at: DateTime<Utc>,
    }

    impl DomainEvent for Pinged {
        fn event_type(&self) -> &'static str {
            "test.pinged"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.occurred_at
        }
    }

    struct Pinger {
        id: CartId,
        events: DomainEvents<Pinged>,
    }

    impl Pinger {
        fn new() -> Self {
            Self {
                id: CartId::new(),
                events: DomainEvents::new(),
            }
        }

        fn ping(&mut self, label: &'static str) {
            self.events.record(Pinged {
                label,
                occurred_at: Utc::now(),
            });
        }
    }

    impl Entity for Pinger {
        type Id = CartId;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    impl AggregateRoot for Pinger {
        type Event = Pinged;

        fn pending_events(&self) -> &[Self::Event] {
            self.events.as_slice()
        }

        fn take_events(&mut self) -> Vec<Self::Event> {
            self.events.take()
        }

        fn clear_events(&mut self) {
            self.events.clear();
        }
    }

    #[test]
    fn forwards_buffered_events_in_order_and_empties_the_buffer() {
        let bus = InMemoryEventBus::new();
        let sub = bus.subscribe();
        let publisher = DomainEventPublisher::new(bus);

        let mut aggregate = Pinger::new();
        aggregate.ping("e1");
        aggregate.ping("e2");
        assert_eq!(aggregate.pending_events().len(), 2);

        let published = publisher.publish_events(&mut aggregate);

        assert_eq!(published, 2);
        assert!(aggregate.pending_events().is_empty());

        assert_eq!(sub.try_recv().unwrap().label, "e1");
        assert_eq!(sub.try_recv().unwrap().label, "e2");
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let bus = InMemoryEventBus::new();
        let sub = bus.subscribe();
        let publisher = DomainEventPublisher::new(bus);

        let mut aggregate = Pinger::new();
        let published = publisher.publish_events(&mut aggregate);

        assert_eq!(published, 0);
        assert!(aggregate.pending_events().is_empty());
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn each_event_is_delivered_exactly_once() {
        let bus = InMemoryEventBus::new();
        let sub = bus.subscribe();
        let publisher = DomainEventPublisher::new(bus);

        let mut aggregate = Pinger::new();
        aggregate.ping("only");
        publisher.publish_events(&mut aggregate);

        // A second publish of the (now empty) aggregate delivers nothing new.
        publisher.publish_events(&mut aggregate);

        assert_eq!(sub.try_recv().unwrap().label, "only");
        assert!(sub.try_recv().is_err());
    }
}
