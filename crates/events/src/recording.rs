//! Recording subscriber for tests.

use std::sync::mpsc::TryRecvError;

use crate::bus::{EventBus, Subscription};

/// In-memory fake that collects published events in delivery order.
///
/// The standard way to assert on the publish flow in tests: attach one before
/// exercising a service, then inspect [`drain`](RecordingSubscriber::drain).
pub struct RecordingSubscriber<E> {
    subscription: Subscription<E>,
}

impl<E> RecordingSubscriber<E> {
    /// Attach a new recorder to the given bus.
    pub fn attach<B>(bus: &B) -> Self
    where
        B: EventBus<E> + ?Sized,
    {
        Self {
            subscription: bus.subscribe(),
        }
    }

    /// Collect every event delivered since the last drain, in order.
    pub fn drain(&self) -> Vec<E> {
        let mut events = Vec::new();
        loop {
            match self.subscription.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}
