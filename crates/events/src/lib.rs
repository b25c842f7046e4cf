//! `storefront-events` — domain-event plumbing.
//!
//! Everything between an aggregate's event buffer and its subscribers: the
//! [`DomainEvent`] capability, the pub/sub [`EventBus`] abstraction with an
//! in-memory implementation, the [`DomainEventPublisher`] that drains
//! aggregates, and the logging [`EventStore`] subscriber.

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod publisher;
pub mod recording;
pub mod store;

pub use bus::{EventBus, Subscription};
pub use event::DomainEvent;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use publisher::DomainEventPublisher;
pub use recording::RecordingSubscriber;
pub use store::EventStore;
