//! Domain error model.
//!
//! A tagged-variant model rather than a deep error hierarchy: every domain
//! failure is either a missing entity or a business-rule violation with a
//! stable error code. Boundary layers (HTTP mappers, etc.) match on these
//! variants exhaustively; nothing in the domain catches them.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Entity families that can be reported as missing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Cart,
    Product,
    Category,
    Coupon,
    Review,
    Shipment,
    Wishlist,
    Notification,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Cart => "cart",
            EntityKind::Product => "product",
            EntityKind::Category => "category",
            EntityKind::Coupon => "coupon",
            EntityKind::Review => "review",
            EntityKind::Shipment => "shipment",
            EntityKind::Wishlist => "wishlist",
            EntityKind::Notification => "notification",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable business-rule error codes surfaced to calling layers.
///
/// The string form (`as_str`) is part of the public contract; renaming a
/// variant must not change it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InsufficientStock,
    InvalidQuantity,
    ProductNotInCart,
    EmptyCart,
    CouponExpired,
    CouponAlreadyRedeemed,
    InvalidRating,
    ReviewNotAllowed,
    DuplicateWishlistItem,
    ProductNotInWishlist,
    InvalidShipmentState,
    NotificationAlreadySent,
    Validation,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::ProductNotInCart => "PRODUCT_NOT_IN_CART",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::CouponExpired => "COUPON_EXPIRED",
            ErrorCode::CouponAlreadyRedeemed => "COUPON_ALREADY_REDEEMED",
            ErrorCode::InvalidRating => "INVALID_RATING",
            ErrorCode::ReviewNotAllowed => "REVIEW_NOT_ALLOWED",
            ErrorCode::DuplicateWishlistItem => "DUPLICATE_WISHLIST_ITEM",
            ErrorCode::ProductNotInWishlist => "PRODUCT_NOT_IN_WISHLIST",
            ErrorCode::InvalidShipmentState => "INVALID_SHIPMENT_STATE",
            ErrorCode::NotificationAlreadySent => "NOTIFICATION_ALREADY_SENT",
            ErrorCode::Validation => "VALIDATION",
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic business failures. Infrastructure
/// concerns (IO, serialization, transport) belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// The requested operation would breach a domain invariant.
    #[error("{code}: {message}")]
    RuleViolation { code: ErrorCode, message: String },
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn rule(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::RuleViolation {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::rule(ErrorCode::Validation, message)
    }

    /// Stock would go below zero: the message carries both quantities so a
    /// support ticket can be resolved without replaying the request.
    pub fn insufficient_stock(product_id: ProductId, available: u32, requested: u32) -> Self {
        Self::rule(
            ErrorCode::InsufficientStock,
            format!(
                "insufficient stock for product {product_id}: requested {requested}, available {available}"
            ),
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Business-rule code, if this is a rule violation.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::RuleViolation { code, .. } => Some(*code),
            Self::NotFound { .. } => None,
        }
    }
}
