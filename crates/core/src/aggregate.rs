//! Aggregate root trait and the domain-event buffer.
//!
//! An aggregate is a transactional consistency boundary. While one business
//! operation runs, the aggregate's methods mutate state and record the domain
//! events describing what happened into a private [`DomainEvents`] buffer.
//! At the end of the unit of work a publisher drains the buffer and forwards
//! the events to subscribers; the buffer is then empty for the next operation.

use crate::entity::Entity;

/// Ordered buffer of domain events awaiting publication.
///
/// Owned privately by each aggregate struct; everything outside the aggregate
/// only ever sees a read-only slice via [`AggregateRoot::pending_events`].
/// Insertion order is preserved and duplicates are not collapsed.
#[derive(Debug, Clone)]
pub struct DomainEvents<E> {
    events: Vec<E>,
}

impl<E> DomainEvents<E> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event. Called from the aggregate's own business methods only.
    pub fn record(&mut self, event: E) {
        self.events.push(event);
    }

    /// Read-only view of the pending events, in recording order.
    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    /// Move every pending event out, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<E> {
        core::mem::take(&mut self.events)
    }

    /// Empty the buffer unconditionally. No effect when already empty.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.events.iter()
    }
}

impl<E> Default for DomainEvents<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E> IntoIterator for &'a DomainEvents<E> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Aggregate root marker + event-buffer interface.
///
/// This is intentionally small so storefront modules can decide how they model
/// state transitions without bringing in any infrastructure concerns. The only
/// obligation is bookkeeping: expose the events recorded during the current
/// unit of work and allow them to be drained or discarded. All three
/// operations are infallible.
pub trait AggregateRoot: Entity {
    /// Event family emitted by this aggregate.
    type Event: Clone + core::fmt::Debug;

    /// Events recorded since construction or since the last drain, in the
    /// order they were recorded.
    fn pending_events(&self) -> &[Self::Event];

    /// Drain the buffer, returning every pending event in recording order.
    fn take_events(&mut self) -> Vec<Self::Event>;

    /// Discard all pending events without publishing them. Idempotent.
    fn clear_events(&mut self);
}
