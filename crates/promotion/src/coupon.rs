use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{
    AggregateRoot, CouponId, CustomerId, DomainError, DomainEvents, DomainResult, Entity,
    ErrorCode,
};
use storefront_events::DomainEvent;

/// Aggregate root: Coupon.
///
/// A single-use percentage discount issued to one customer. Redemption is
/// checked against an explicit `now` so the rules stay deterministic.
#[derive(Debug, Clone)]
pub struct Coupon {
    id: CouponId,
    code: String,
    discount_percent: u8,
    valid_until: DateTime<Utc>,
    issued_to: CustomerId,
    redeemed: bool,
    events: DomainEvents<PromotionEvent>,
}

impl Coupon {
    /// Issue a coupon to a customer.
    pub fn issue(
        id: CouponId,
        code: impl Into<String>,
        discount_percent: u8,
        valid_until: DateTime<Utc>,
        issued_to: CustomerId,
    ) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::validation("coupon code cannot be empty"));
        }
        if discount_percent == 0 || discount_percent > 100 {
            return Err(DomainError::validation(
                "discount must be between 1 and 100 percent",
            ));
        }

        let mut coupon = Self {
            id,
            code: code.clone(),
            discount_percent,
            valid_until,
            issued_to,
            redeemed: false,
            events: DomainEvents::new(),
        };
        coupon.events.record(PromotionEvent::CouponIssued(CouponIssued {
            coupon_id: id,
            code,
            discount_percent,
            valid_until,
            customer_id: issued_to,
            occurred_at: Utc::now(),
        }));
        Ok(coupon)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn discount_percent(&self) -> u8 {
        self.discount_percent
    }

    pub fn issued_to(&self) -> CustomerId {
        self.issued_to
    }

    pub fn is_redeemed(&self) -> bool {
        self.redeemed
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.valid_until
    }

    /// Redeem the coupon at `now`. A coupon can be redeemed once, before its
    /// expiry.
    pub fn redeem(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.redeemed {
            return Err(DomainError::rule(
                ErrorCode::CouponAlreadyRedeemed,
                format!("coupon {} has already been redeemed", self.code),
            ));
        }
        if self.is_expired(now) {
            return Err(DomainError::rule(
                ErrorCode::CouponExpired,
                format!("coupon {} expired at {}", self.code, self.valid_until),
            ));
        }

        self.redeemed = true;
        self.events.record(PromotionEvent::CouponRedeemed(CouponRedeemed {
            coupon_id: self.id,
            customer_id: self.issued_to,
            occurred_at: Utc::now(),
        }));
        Ok(())
    }
}

impl Entity for Coupon {
    type Id = CouponId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Coupon {
    type Event = PromotionEvent;

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

/// Event: CouponIssued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponIssued {
    pub coupon_id: CouponId,
    pub code: String,
    pub discount_percent: u8,
    pub valid_until: DateTime<Utc>,
    pub customer_id: CustomerId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CouponRedeemed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponRedeemed {
    pub coupon_id: CouponId,
    pub customer_id: CustomerId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromotionEvent {
    CouponIssued(CouponIssued),
    CouponRedeemed(CouponRedeemed),
}

impl DomainEvent for PromotionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PromotionEvent::CouponIssued(_) => "promotion.coupon.issued",
            PromotionEvent::CouponRedeemed(_) => "promotion.coupon.redeemed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PromotionEvent::CouponIssued(e) => e.occurred_at,
            PromotionEvent::CouponRedeemed(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_coupon() -> Coupon {
        Coupon::issue(
            CouponId::new(),
            "SAVE10",
            10,
            Utc::now() + Duration::days(7),
            CustomerId::new(),
        )
        .unwrap()
    }

    #[test]
    fn issue_records_coupon_issued() {
        let coupon = valid_coupon();

        assert_eq!(coupon.pending_events().len(), 1);
        match &coupon.pending_events()[0] {
            PromotionEvent::CouponIssued(e) => {
                assert_eq!(e.code, "SAVE10");
                assert_eq!(e.discount_percent, 10);
            }
            other => panic!("expected CouponIssued, got {other:?}"),
        }
    }

    #[test]
    fn issue_rejects_bad_discounts() {
        let expiry = Utc::now() + Duration::days(1);
        let customer = CustomerId::new();

        assert!(Coupon::issue(CouponId::new(), "X", 0, expiry, customer).is_err());
        assert!(Coupon::issue(CouponId::new(), "X", 101, expiry, customer).is_err());
        assert!(Coupon::issue(CouponId::new(), "  ", 10, expiry, customer).is_err());
    }

    #[test]
    fn redeem_flips_state_and_records() {
        let mut coupon = valid_coupon();
        coupon.clear_events();

        coupon.redeem(Utc::now()).unwrap();

        assert!(coupon.is_redeemed());
        assert!(matches!(
            coupon.pending_events()[0],
            PromotionEvent::CouponRedeemed(_)
        ));
    }

    #[test]
    fn second_redemption_is_rejected() {
        let mut coupon = valid_coupon();
        coupon.redeem(Utc::now()).unwrap();

        let err = coupon.redeem(Utc::now()).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::CouponAlreadyRedeemed));
    }

    #[test]
    fn expired_coupon_cannot_be_redeemed() {
        let mut coupon = Coupon::issue(
            CouponId::new(),
            "LATE",
            15,
            Utc::now() - Duration::days(1),
            CustomerId::new(),
        )
        .unwrap();
        coupon.clear_events();

        let err = coupon.redeem(Utc::now()).unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::CouponExpired));
        assert!(err.to_string().contains("LATE"));
        assert!(!coupon.is_redeemed());
        assert!(coupon.pending_events().is_empty());
    }
}
