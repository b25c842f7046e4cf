//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $t:ident, $name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in
            /// tests for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::validation(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

uuid_id!(
    /// Identifier of a customer (actor identity).
    CustomerId,
    "CustomerId"
);
uuid_id!(
    /// Identifier of a shopping cart.
    CartId,
    "CartId"
);
uuid_id!(
    /// Identifier of a catalog product.
    ProductId,
    "ProductId"
);
uuid_id!(
    /// Identifier of a catalog category.
    CategoryId,
    "CategoryId"
);
uuid_id!(
    /// Identifier of a promotion coupon.
    CouponId,
    "CouponId"
);
uuid_id!(
    /// Identifier of a product review.
    ReviewId,
    "ReviewId"
);
uuid_id!(
    /// Identifier of an order, referenced by shipping.
    OrderId,
    "OrderId"
);
uuid_id!(
    /// Identifier of a shipment.
    ShipmentId,
    "ShipmentId"
);
uuid_id!(
    /// Identifier of a wishlist.
    WishlistId,
    "WishlistId"
);
uuid_id!(
    /// Identifier of a customer notification.
    NotificationId,
    "NotificationId"
);
