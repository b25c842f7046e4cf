use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{
    AggregateRoot, CustomerId, DomainError, DomainEvents, DomainResult, Entity, ErrorCode,
    ProductId, WishlistId,
};
use storefront_events::DomainEvent;

/// Aggregate root: Wishlist.
///
/// A customer's saved products, kept in the order they were added. Each
/// product appears at most once.
#[derive(Debug, Clone)]
pub struct Wishlist {
    id: WishlistId,
    customer_id: CustomerId,
    product_ids: Vec<ProductId>,
    events: DomainEvents<WishlistEvent>,
}

impl Wishlist {
    /// Open an empty wishlist for a customer.
    pub fn open(id: WishlistId, customer_id: CustomerId) -> Self {
        let mut wishlist = Self {
            id,
            customer_id,
            product_ids: Vec::new(),
            events: DomainEvents::new(),
        };
        wishlist
            .events
            .record(WishlistEvent::WishlistOpened(WishlistOpened {
                wishlist_id: id,
                customer_id,
                occurred_at: Utc::now(),
            }));
        wishlist
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Saved products in the order they were added.
    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.product_ids.contains(&product_id)
    }

    /// Save a product. A product can only be on the list once.
    pub fn add_product(&mut self, product_id: ProductId) -> DomainResult<()> {
        if self.contains(product_id) {
            return Err(DomainError::rule(
                ErrorCode::DuplicateWishlistItem,
                format!("product {product_id} is already on the wishlist"),
            ));
        }

        self.product_ids.push(product_id);
        self.events.record(WishlistEvent::ProductAdded(ProductAdded {
            wishlist_id: self.id,
            product_id,
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    /// Remove a saved product.
    pub fn remove_product(&mut self, product_id: ProductId) -> DomainResult<()> {
        let before = self.product_ids.len();
        self.product_ids.retain(|p| *p != product_id);

        if self.product_ids.len() == before {
            return Err(DomainError::rule(
                ErrorCode::ProductNotInWishlist,
                format!("product {product_id} is not on the wishlist"),
            ));
        }

        self.events
            .record(WishlistEvent::ProductRemoved(ProductRemoved {
                wishlist_id: self.id,
                product_id,
                occurred_at: Utc::now(),
            }));
        Ok(())
    }
}

impl Entity for Wishlist {
    type Id = WishlistId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Wishlist {
    type Event = WishlistEvent;

    fn pending_events(&self) -> &[Self::Event] {
        self.events.as_slice()
    }

    fn take_events(&mut self) -> Vec<Self::Event> {
        self.events.take()
    }

    fn clear_events(&mut self) {
        self.events.clear();
    }
}

/// Event: WishlistOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistOpened {
    pub wishlist_id: WishlistId,
    pub customer_id: CustomerId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub wishlist_id: WishlistId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub wishlist_id: WishlistId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishlistEvent {
    WishlistOpened(WishlistOpened),
    ProductAdded(ProductAdded),
    ProductRemoved(ProductRemoved),
}

impl DomainEvent for WishlistEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WishlistEvent::WishlistOpened(_) => "wishlist.opened",
            WishlistEvent::ProductAdded(_) => "wishlist.product_added",
            WishlistEvent::ProductRemoved(_) => "wishlist.product_removed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            WishlistEvent::WishlistOpened(e) => e.occurred_at,
            WishlistEvent::ProductAdded(e) => e.occurred_at,
            WishlistEvent::ProductRemoved(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_wishlist() -> Wishlist {
        let mut wishlist = Wishlist::open(WishlistId::new(), CustomerId::new());
        wishlist.clear_events();
        wishlist
    }

    #[test]
    fn add_product_records_and_preserves_order() {
        let mut wishlist = test_wishlist();
        let first = ProductId::new();
        let second = ProductId::new();

        wishlist.add_product(first).unwrap();
        wishlist.add_product(second).unwrap();

        assert_eq!(wishlist.product_ids(), &[first, second]);
        assert_eq!(wishlist.pending_events().len(), 2);
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut wishlist = test_wishlist();
        let product_id = ProductId::new();
        wishlist.add_product(product_id).unwrap();
        wishlist.clear_events();

        let err = wishlist.add_product(product_id).unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::DuplicateWishlistItem));
        assert_eq!(err.code().unwrap().as_str(), "DUPLICATE_WISHLIST_ITEM");
        assert_eq!(wishlist.product_ids().len(), 1);
        assert!(wishlist.pending_events().is_empty());
    }

    #[test]
    fn removing_an_absent_product_is_rejected() {
        let mut wishlist = test_wishlist();

        let err = wishlist.remove_product(ProductId::new()).unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::ProductNotInWishlist));
    }

    #[test]
    fn remove_then_re_add_is_allowed() {
        let mut wishlist = test_wishlist();
        let product_id = ProductId::new();

        wishlist.add_product(product_id).unwrap();
        wishlist.remove_product(product_id).unwrap();
        wishlist.add_product(product_id).unwrap();

        assert!(wishlist.contains(product_id));
        assert_eq!(wishlist.pending_events().len(), 3);
    }
}
