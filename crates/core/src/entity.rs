//! Entity trait: identity + continuity across state changes.

/// Something in the domain with a stable identity.
///
/// An entity is the same entity however much its state changes: a `Cart` that
/// gets emptied is still that customer's cart, a repriced `Product` is still
/// the same catalog entry. Equality of entities is therefore identity-based,
/// never value-based (contrast `ValueObject`).
///
/// Every aggregate root is an entity; so are non-root entities owned by one.
pub trait Entity {
    /// Strongly-typed entity identifier (`CartId`, `ProductId`, ...).
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
