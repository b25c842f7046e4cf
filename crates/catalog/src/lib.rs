//! Catalog domain module.
//!
//! This crate contains business rules for products and stock, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{
    CatalogEvent, PriceChanged, Product, ProductCreated, StockDecreased, StockIncreased,
};
