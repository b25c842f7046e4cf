//! Review domain module.
//!
//! This crate contains business rules for product reviews, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod review;

pub use review::{Review, ReviewEvent, ReviewPosted, ReviewRevised};
