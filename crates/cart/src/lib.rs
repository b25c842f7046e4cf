//! Cart domain module.
//!
//! This crate contains business rules for shopping carts, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod cart;

pub use cart::{
    Cart, CartEmptied, CartEvent, CartItem, CartOpened, ItemAdded, ItemQuantityChanged,
    ItemRemoved,
};
