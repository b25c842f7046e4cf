//! Shipping domain module.
//!
//! This crate contains business rules for order shipments, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod shipment;

pub use shipment::{
    Shipment, ShipmentDelivered, ShipmentDispatched, ShipmentRegistered, ShipmentStatus,
    ShippingEvent,
};
