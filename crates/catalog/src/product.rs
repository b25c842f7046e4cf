use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{
    AggregateRoot, CategoryId, DomainError, DomainEvents, DomainResult, Entity, ErrorCode,
    ProductId,
};
use storefront_events::DomainEvent;

/// Aggregate root: Product.
///
/// Owns the sellable item's descriptive data plus its stock count. Every
/// mutating method validates, updates state, and records the matching
/// [`CatalogEvent`] into the aggregate's buffer.
#[derive(Debug, Clone)]
pub struct Product {
    id: ProductId,
    category_id: CategoryId,
    sku: String,
    name: String,
    /// Price in minor currency units (e.g. cents).
    price: u64,
    stock: u32,
    events: DomainEvents<CatalogEvent>,
}

impl Product {
    /// Register a new product in the catalog.
    pub fn create(
        id: ProductId,
        category_id: CategoryId,
        sku: impl Into<String>,
        name: impl Into<String>,
        price: u64,
    ) -> DomainResult<Self> {
        let sku = sku.into();
        let name = name.into();

        if sku.trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let mut product = Self {
            id,
            category_id,
            sku: sku.clone(),
            name: name.clone(),
            price,
            stock: 0,
            events: DomainEvents::new(),
        };
        product.events.record(CatalogEvent::ProductCreated(ProductCreated {
            product_id: id,
            category_id,
            sku,
            name,
            price,
            occurred_at: Utc::now(),
        }));
        Ok(product)
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Add received stock.
    pub fn increase_stock(&mut self, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::rule(
                ErrorCode::InvalidQuantity,
                "stock increase must be positive",
            ));
        }

        self.stock = self.stock.checked_add(quantity).ok_or_else(|| {
            DomainError::rule(
                ErrorCode::InvalidQuantity,
                format!("stock increase of {quantity} would overflow"),
            )
        })?;
        self.events.record(CatalogEvent::StockIncreased(StockIncreased {
            product_id: self.id,
            quantity,
            stock: self.stock,
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    /// Remove sold or damaged stock. Stock can never go below zero.
    pub fn decrease_stock(&mut self, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::rule(
                ErrorCode::InvalidQuantity,
                "stock decrease must be positive",
            ));
        }
        if quantity > self.stock {
            return Err(DomainError::insufficient_stock(self.id, self.stock, quantity));
        }

        self.stock -= quantity;
        self.events.record(CatalogEvent::StockDecreased(StockDecreased {
            product_id: self.id,
            quantity,
            stock: self.stock,
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    /// Reprice the product. Recording is skipped when the price is unchanged.
    pub fn change_price(&mut self, new_price: u64) {
        if new_price == self.price {
            return;
        }

        let old_price = self.price;
        self.price = new_price;
        self.events.record(CatalogEvent::PriceChanged(PriceChanged {
            product_id: self.id,
            old_price,
            new_price,
            occurred_at: Utc::now(),
        }));
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Product {
    type Event = CatalogEvent;

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

/// Event: ProductCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub product_id: ProductId,
    pub category_id: CategoryId,
    pub sku: String,
    pub name: String,
    pub price: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockIncreased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockIncreased {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Stock level after the increase.
    pub stock: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockDecreased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDecreased {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Stock level after the decrease.
    pub stock: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PriceChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChanged {
    pub product_id: ProductId,
    pub old_price: u64,
    pub new_price: u64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ProductCreated(ProductCreated),
    StockIncreased(StockIncreased),
    StockDecreased(StockDecreased),
    PriceChanged(PriceChanged),
}

impl DomainEvent for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ProductCreated(_) => "catalog.product.created",
            CatalogEvent::StockIncreased(_) => "catalog.product.stock_increased",
            CatalogEvent::StockDecreased(_) => "catalog.product.stock_decreased",
            CatalogEvent::PriceChanged(_) => "catalog.product.price_changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ProductCreated(e) => e.occurred_at,
            CatalogEvent::StockIncreased(e) => e.occurred_at,
            CatalogEvent::StockDecreased(e) => e.occurred_at,
            CatalogEvent::PriceChanged(e) => e.occurred_at,
        }
    }
}
