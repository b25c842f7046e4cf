//! Promotion domain module.
//!
//! This crate contains business rules for discount coupons, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod coupon;

pub use coupon::{Coupon, CouponIssued, CouponRedeemed, PromotionEvent};
