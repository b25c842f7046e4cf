use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{
    AggregateRoot, DomainError, DomainEvents, DomainResult, Entity, ErrorCode, OrderId,
    ShipmentId,
};
use storefront_events::DomainEvent;

/// Shipment status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentStatus {
    Pending,
    Dispatched,
    Delivered,
}

/// Aggregate root: Shipment.
///
/// Status only moves forward: Pending → Dispatched → Delivered.
#[derive(Debug, Clone)]
pub struct Shipment {
    id: ShipmentId,
    order_id: OrderId,
    address: String,
    status: ShipmentStatus,
    tracking_number: Option<String>,
    events: DomainEvents<ShippingEvent>,
}

impl Shipment {
    /// Register a shipment for an order.
    pub fn register(id: ShipmentId, order_id: OrderId, address: impl Into<String>) -> DomainResult<Self> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(DomainError::validation("shipping address cannot be empty"));
        }

        let mut shipment = Self {
            id,
            order_id,
            address: address.clone(),
            status: ShipmentStatus::Pending,
            tracking_number: None,
            events: DomainEvents::new(),
        };
        shipment
            .events
            .record(ShippingEvent::ShipmentRegistered(ShipmentRegistered {
                shipment_id: id,
                order_id,
                address,
                occurred_at: Utc::now(),
            }));
        Ok(shipment)
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn status(&self) -> ShipmentStatus {
        self.status
    }

    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    /// Hand the parcel to the carrier.
    pub fn dispatch(&mut self, tracking_number: impl Into<String>) -> DomainResult<()> {
        if self.status != ShipmentStatus::Pending {
            return Err(self.bad_transition("dispatch"));
        }

        let tracking_number = tracking_number.into();
        self.status = ShipmentStatus::Dispatched;
        self.tracking_number = Some(tracking_number.clone());
        self.events
            .record(ShippingEvent::ShipmentDispatched(ShipmentDispatched {
                shipment_id: self.id,
                order_id: self.order_id,
                tracking_number,
                occurred_at: Utc::now(),
            }));
        Ok(())
    }

    /// Confirm delivery to the customer.
    pub fn mark_delivered(&mut self) -> DomainResult<()> {
        if self.status != ShipmentStatus::Dispatched {
            return Err(self.bad_transition("mark_delivered"));
        }

        self.status = ShipmentStatus::Delivered;
        self.events
            .record(ShippingEvent::ShipmentDelivered(ShipmentDelivered {
                shipment_id: self.id,
                order_id: self.order_id,
                occurred_at: Utc::now(),
            }));
        Ok(())
    }

    fn bad_transition(&self, operation: &str) -> DomainError {
        DomainError::rule(
            ErrorCode::InvalidShipmentState,
            format!("cannot {operation} a shipment in state {:?}", self.status),
        )
    }
}

impl Entity for Shipment {
    type Id = ShipmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Shipment {
    type Event = ShippingEvent;

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

/// Event: ShipmentRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRegistered {
    pub shipment_id: ShipmentId,
    pub order_id: OrderId,
    pub address: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShipmentDispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentDispatched {
    pub shipment_id: ShipmentId,
    pub order_id: OrderId,
    pub tracking_number: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShipmentDelivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentDelivered {
    pub shipment_id: ShipmentId,
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingEvent {
    ShipmentRegistered(ShipmentRegistered),
    ShipmentDispatched(ShipmentDispatched),
    ShipmentDelivered(ShipmentDelivered),
}

impl DomainEvent for ShippingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ShippingEvent::ShipmentRegistered(_) => "shipping.shipment.registered",
            ShippingEvent::ShipmentDispatched(_) => "shipping.shipment.dispatched",
            ShippingEvent::ShipmentDelivered(_) => "shipping.shipment.delivered",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ShippingEvent::ShipmentRegistered(e) => e.occurred_at,
            ShippingEvent::ShipmentDispatched(e) => e.occurred_at,
            ShippingEvent::ShipmentDelivered(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_shipment() -> Shipment {
        let mut shipment =
            Shipment::register(ShipmentId::new(), OrderId::new(), "1 Main St, Springfield")
                .unwrap();
        shipment.clear_events();
        shipment
    }

    #[test]
    fn register_records_shipment_registered() {
        let shipment =
            Shipment::register(ShipmentId::new(), OrderId::new(), "1 Main St").unwrap();

        assert_eq!(shipment.status(), ShipmentStatus::Pending);
        assert!(matches!(
            shipment.pending_events()[0],
            ShippingEvent::ShipmentRegistered(_)
        ));
    }

    #[test]
    fn register_rejects_blank_address() {
        let err = Shipment::register(ShipmentId::new(), OrderId::new(), "  ").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::Validation));
    }

    #[test]
    fn full_lifecycle_in_order() {
        let mut shipment = pending_shipment();

        shipment.dispatch("TRACK-123").unwrap();
        assert_eq!(shipment.status(), ShipmentStatus::Dispatched);
        assert_eq!(shipment.tracking_number(), Some("TRACK-123"));

        shipment.mark_delivered().unwrap();
        assert_eq!(shipment.status(), ShipmentStatus::Delivered);

        let events = shipment.pending_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ShippingEvent::ShipmentDispatched(_)));
        assert!(matches!(events[1], ShippingEvent::ShipmentDelivered(_)));
    }

    #[test]
    fn cannot_deliver_before_dispatch() {
        let mut shipment = pending_shipment();

        let err = shipment.mark_delivered().unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::InvalidShipmentState));
        assert_eq!(shipment.status(), ShipmentStatus::Pending);
        assert!(shipment.pending_events().is_empty());
    }

    #[test]
    fn cannot_dispatch_twice() {
        let mut shipment = pending_shipment();
        shipment.dispatch("TRACK-1").unwrap();

        let err = shipment.dispatch("TRACK-2").unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::InvalidShipmentState));
        assert_eq!(shipment.tracking_number(), Some("TRACK-1"));
    }
}
