//! Wishlist domain module.
//!
//! This crate contains business rules for customer wishlists, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod wishlist;

pub use wishlist::{ProductAdded, ProductRemoved, Wishlist, WishlistEvent, WishlistOpened};
