use chrono::{DateTime, Utc};

/// A domain event: an immutable record that something happened.
///
/// Events are facts. They carry the identifying fields of the change plus a
/// single occurrence timestamp stamped at construction, and are never mutated
/// afterwards.
pub trait DomainEvent: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "catalog.product.stock_decreased").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (business time, set at construction).
    fn occurred_at(&self) -> DateTime<Utc>;
}
