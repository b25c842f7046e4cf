use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{
    AggregateRoot, CartId, CustomerId, DomainError, DomainEvents, DomainResult, Entity, ErrorCode,
    ProductId, ValueObject,
};
use storefront_events::DomainEvent;

/// One line in a cart.
///
/// The unit price is captured when the line is added, so a later catalog
/// reprice does not silently change an open cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Price per unit in minor currency units, frozen at add time.
    pub unit_price: u64,
}

impl ValueObject for CartItem {}

/// Aggregate root: Cart.
#[derive(Debug, Clone)]
pub struct Cart {
    id: CartId,
    customer_id: CustomerId,
    items: Vec<CartItem>,
    events: DomainEvents<CartEvent>,
}

impl Cart {
    /// Open a fresh cart for a customer.
    pub fn open(id: CartId, customer_id: CustomerId) -> Self {
        let mut cart = Self {
            id,
            customer_id,
            items: Vec::new(),
            events: DomainEvents::new(),
        };
        cart.events.record(CartEvent::CartOpened(CartOpened {
            cart_id: id,
            customer_id,
            occurred_at: Utc::now(),
        }));
        cart
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart total in minor currency units.
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity) * item.unit_price)
            .sum()
    }

    /// Put a product into the cart. Adding a product that is already present
    /// merges the quantities into the existing line.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        unit_price: u64,
    ) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::rule(
                ErrorCode::InvalidQuantity,
                "quantity must be positive",
            ));
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    DomainError::rule(
                        ErrorCode::InvalidQuantity,
                        format!("quantity for product {product_id} would overflow"),
                    )
                })?;
            }
            None => self.items.push(CartItem {
                product_id,
                quantity,
                unit_price,
            }),
        }

        self.events.record(CartEvent::ItemAdded(ItemAdded {
            cart_id: self.id,
            product_id,
            quantity,
            unit_price,
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    /// Set the quantity of an existing line.
    pub fn change_quantity(&mut self, product_id: ProductId, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::rule(
                ErrorCode::InvalidQuantity,
                "quantity must be positive; remove the item instead",
            ));
        }

        let line = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or_else(|| {
                DomainError::rule(
                    ErrorCode::ProductNotInCart,
                    format!("product {product_id} is not in the cart"),
                )
            })?;

        let old_quantity = line.quantity;
        line.quantity = quantity;
        self.events
            .record(CartEvent::ItemQuantityChanged(ItemQuantityChanged {
                cart_id: self.id,
                product_id,
                old_quantity,
                new_quantity: quantity,
                occurred_at: Utc::now(),
            }));
        Ok(())
    }

    /// Remove a line from the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> DomainResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == before {
            return Err(DomainError::rule(
                ErrorCode::ProductNotInCart,
                format!("product {product_id} is not in the cart"),
            ));
        }

        self.events.record(CartEvent::ItemRemoved(ItemRemoved {
            cart_id: self.id,
            product_id,
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    /// Drop every line. Records nothing when the cart was already empty.
    pub fn empty(&mut self) {
        if self.items.is_empty() {
            return;
        }

        self.items.clear();
        self.events.record(CartEvent::CartEmptied(CartEmptied {
            cart_id: self.id,
            occurred_at: Utc::now(),
        }));
    }
}

impl Entity for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Cart {
    type Event = CartEvent;

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

/// Event: CartOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartOpened {
    pub cart_id: CartId,
    pub customer_id: CustomerId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemQuantityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuantityChanged {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub old_quantity: u32,
    pub new_quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartEmptied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEmptied {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    CartOpened(CartOpened),
    ItemAdded(ItemAdded),
    ItemQuantityChanged(ItemQuantityChanged),
    ItemRemoved(ItemRemoved),
    CartEmptied(CartEmptied),
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::CartOpened(_) => "cart.opened",
            CartEvent::ItemAdded(_) => "cart.item_added",
            CartEvent::ItemQuantityChanged(_) => "cart.item_quantity_changed",
            CartEvent::ItemRemoved(_) => "cart.item_removed",
            CartEvent::CartEmptied(_) => "cart.emptied",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::CartOpened(e) => e.occurred_at,
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemQuantityChanged(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::CartEmptied(e) => e.occurred_at,
        }
    }
}
