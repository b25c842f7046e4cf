//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the aggregate-root trait with its domain-event buffer, strongly-typed
//! identifiers, and the domain error model shared by every storefront module.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{AggregateRoot, DomainEvents};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, EntityKind, ErrorCode};
pub use id::{
    CartId, CategoryId, CouponId, CustomerId, NotificationId, OrderId, ProductId, ReviewId,
    ShipmentId, WishlistId,
};
pub use value_object::ValueObject;
