use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{
    AggregateRoot, CustomerId, DomainError, DomainEvents, DomainResult, Entity, ErrorCode,
    ProductId, ReviewId,
};
use storefront_events::DomainEvent;

/// Ratings are stars, 1 through 5.
const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;

/// Aggregate root: Review.
#[derive(Debug, Clone)]
pub struct Review {
    id: ReviewId,
    product_id: ProductId,
    customer_id: CustomerId,
    rating: u8,
    comment: String,
    events: DomainEvents<ReviewEvent>,
}

impl Review {
    /// Post a review for a purchased product.
    ///
    /// Whether the customer actually purchased the product is decided by the
    /// application layer (it has access to order history) and passed in as
    /// `verified_purchase`; reviews from non-purchasers are disallowed.
    pub fn post(
        id: ReviewId,
        product_id: ProductId,
        customer_id: CustomerId,
        rating: u8,
        comment: impl Into<String>,
        verified_purchase: bool,
    ) -> DomainResult<Self> {
        if !verified_purchase {
            return Err(DomainError::rule(
                ErrorCode::ReviewNotAllowed,
                format!("customer {customer_id} has not purchased product {product_id}"),
            ));
        }
        Self::check_rating(rating)?;

        let comment = comment.into();
        let mut review = Self {
            id,
            product_id,
            customer_id,
            rating,
            comment: comment.clone(),
            events: DomainEvents::new(),
        };
        review.events.record(ReviewEvent::ReviewPosted(ReviewPosted {
            review_id: id,
            product_id,
            customer_id,
            rating,
            comment,
            occurred_at: Utc::now(),
        }));
        Ok(review)
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Replace the rating and comment of an existing review.
    pub fn revise(&mut self, rating: u8, comment: impl Into<String>) -> DomainResult<()> {
        Self::check_rating(rating)?;

        self.rating = rating;
        self.comment = comment.into();
        self.events.record(ReviewEvent::ReviewRevised(ReviewRevised {
            review_id: self.id,
            rating,
            comment: self.comment.clone(),
            occurred_at: Utc::now(),
        }));
        Ok(())
    }

    fn check_rating(rating: u8) -> DomainResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DomainError::rule(
                ErrorCode::InvalidRating,
                format!("rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"),
            ));
        }
        Ok(())
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Review {
    type Event = ReviewEvent;

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

/// Event: ReviewPosted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPosted {
    pub review_id: ReviewId,
    pub product_id: ProductId,
    pub customer_id: CustomerId,
    pub rating: u8,
    pub comment: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ReviewRevised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRevised {
    pub review_id: ReviewId,
    pub rating: u8,
    pub comment: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewEvent {
    ReviewPosted(ReviewPosted),
    ReviewRevised(ReviewRevised),
}

impl DomainEvent for ReviewEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ReviewEvent::ReviewPosted(_) => "review.posted",
            ReviewEvent::ReviewRevised(_) => "review.revised",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ReviewEvent::ReviewPosted(e) => e.occurred_at,
            ReviewEvent::ReviewRevised(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_review(rating: u8) -> DomainResult<Review> {
        Review::post(
            ReviewId::new(),
            ProductId::new(),
            CustomerId::new(),
            rating,
            "Solid product.",
            true,
        )
    }

    #[test]
    fn post_records_review_posted() {
        let review = post_review(4).unwrap();

        match &review.pending_events()[0] {
            ReviewEvent::ReviewPosted(e) => {
                assert_eq!(e.rating, 4);
                assert_eq!(e.comment, "Solid product.");
            }
            other => panic!("expected ReviewPosted, got {other:?}"),
        }
    }

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        assert_eq!(
            post_review(0).unwrap_err().code(),
            Some(ErrorCode::InvalidRating)
        );
        assert_eq!(
            post_review(6).unwrap_err().code(),
            Some(ErrorCode::InvalidRating)
        );
        assert!(post_review(1).is_ok());
        assert!(post_review(5).is_ok());
    }

    #[test]
    fn unverified_purchase_cannot_review() {
        let err = Review::post(
            ReviewId::new(),
            ProductId::new(),
            CustomerId::new(),
            5,
            "Never bought it.",
            false,
        )
        .unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::ReviewNotAllowed));
    }

    #[test]
    fn revise_updates_and_records() {
        let mut review = post_review(2).unwrap();
        review.clear_events();

        review.revise(5, "It grew on me.").unwrap();

        assert_eq!(review.rating(), 5);
        assert_eq!(review.comment(), "It grew on me.");
        assert!(matches!(
            review.pending_events()[0],
            ReviewEvent::ReviewRevised(_)
        ));
    }

    #[test]
    fn revise_with_bad_rating_changes_nothing() {
        let mut review = post_review(3).unwrap();
        review.clear_events();

        let err = review.revise(9, "way too good").unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::InvalidRating));
        assert_eq!(review.rating(), 3);
        assert!(review.pending_events().is_empty());
    }
}
