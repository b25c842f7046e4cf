//! Notification domain module.
//!
//! This crate contains business rules for customer notifications, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod notification;

pub use notification::{
    Channel, Notification, NotificationEvent, NotificationQueued, NotificationRead,
    NotificationSent, NotificationStatus,
};
