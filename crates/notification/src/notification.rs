use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{
    AggregateRoot, CustomerId, DomainError, DomainEvents, DomainResult, Entity, ErrorCode,
    NotificationId,
};
use storefront_events::DomainEvent;

/// Delivery channel for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Push,
}

/// Notification status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Queued,
    Sent,
    Read,
}

/// Aggregate root: Notification.
///
/// The domain tracks the lifecycle only; actually delivering over the channel
/// is an infrastructure concern that reports back via `mark_sent`.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    customer_id: CustomerId,
    channel: Channel,
    subject: String,
    body: String,
    status: NotificationStatus,
    events: DomainEvents<NotificationEvent>,
}

impl Notification {
    /// Queue a notification for delivery.
    pub fn queue(
        id: NotificationId,
        customer_id: CustomerId,
        channel: Channel,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> DomainResult<Self> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(DomainError::validation("subject cannot be empty"));
        }

        let mut notification = Self {
            id,
            customer_id,
            channel,
            subject: subject.clone(),
            body: body.into(),
            status: NotificationStatus::Queued,
            events: DomainEvents::new(),
        };
        notification
            .events
            .record(NotificationEvent::NotificationQueued(NotificationQueued {
                notification_id: id,
                customer_id,
                channel,
                subject,
                occurred_at: Utc::now(),
            }));
        Ok(notification)
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status(&self) -> NotificationStatus {
        self.status
    }

    /// Record that the channel accepted the message.
    pub fn mark_sent(&mut self) -> DomainResult<()> {
        if self.status != NotificationStatus::Queued {
            return Err(DomainError::rule(
                ErrorCode::NotificationAlreadySent,
                format!("notification {} was already sent", self.id),
            ));
        }

        self.status = NotificationStatus::Sent;
        self.events
            .record(NotificationEvent::NotificationSent(NotificationSent {
                notification_id: self.id,
                channel: self.channel,
                occurred_at: Utc::now(),
            }));
        Ok(())
    }

    /// Record that the customer opened the notification. Idempotent: reading
    /// twice records one event.
    pub fn mark_read(&mut self) -> DomainResult<()> {
        match self.status {
            NotificationStatus::Queued => Err(DomainError::validation(
                "a queued notification cannot be read",
            )),
            NotificationStatus::Read => Ok(()),
            NotificationStatus::Sent => {
                self.status = NotificationStatus::Read;
                self.events
                    .record(NotificationEvent::NotificationRead(NotificationRead {
                        notification_id: self.id,
                        occurred_at: Utc::now(),
                    }));
                Ok(())
            }
        }
    }
}

impl Entity for Notification {
    type Id = NotificationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Notification {
    type Event = NotificationEvent;

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

/// Event: NotificationQueued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationQueued {
    pub notification_id: NotificationId,
    pub customer_id: CustomerId,
    pub channel: Channel,
    pub subject: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: NotificationSent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSent {
    pub notification_id: NotificationId,
    pub channel: Channel,
    pub occurred_at: DateTime<Utc>,
}

/// Event: NotificationRead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRead {
    pub notification_id: NotificationId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationEvent {
    NotificationQueued(NotificationQueued),
    NotificationSent(NotificationSent),
    NotificationRead(NotificationRead),
}

impl DomainEvent for NotificationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            NotificationEvent::NotificationQueued(_) => "notification.queued",
            NotificationEvent::NotificationSent(_) => "notification.sent",
            NotificationEvent::NotificationRead(_) => "notification.read",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            NotificationEvent::NotificationQueued(e) => e.occurred_at,
            NotificationEvent::NotificationSent(e) => e.occurred_at,
            NotificationEvent::NotificationRead(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queued() -> Notification {
        let mut notification = Notification::queue(
            NotificationId::new(),
            CustomerId::new(),
            Channel::Email,
            "Your order shipped",
            "Tracking: TRACK-123",
        )
        .unwrap();
        notification.clear_events();
        notification
    }

    #[test]
    fn queue_records_notification_queued() {
        let notification = Notification::queue(
            NotificationId::new(),
            CustomerId::new(),
            Channel::Push,
            "Hello",
            "",
        )
        .unwrap();

        assert_eq!(notification.status(), NotificationStatus::Queued);
        match &notification.pending_events()[0] {
            NotificationEvent::NotificationQueued(e) => {
                assert_eq!(e.channel, Channel::Push);
                assert_eq!(e.subject, "Hello");
            }
            other => panic!("expected NotificationQueued, got {other:?}"),
        }
    }

    #[test]
    fn blank_subject_is_rejected() {
        let err = Notification::queue(
            NotificationId::new(),
            CustomerId::new(),
            Channel::Sms,
            "   ",
            "body",
        )
        .unwrap_err();

        assert_eq!(err.code(), Some(ErrorCode::Validation));
    }

    #[test]
    fn sent_then_read_lifecycle() {
        let mut notification = queued();

        notification.mark_sent().unwrap();
        assert_eq!(notification.status(), NotificationStatus::Sent);

        notification.mark_read().unwrap();
        assert_eq!(notification.status(), NotificationStatus::Read);

        let events = notification.pending_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], NotificationEvent::NotificationSent(_)));
        assert!(matches!(events[1], NotificationEvent::NotificationRead(_)));
    }

    #[test]
    fn double_send_is_rejected() {
        let mut notification = queued();
        notification.mark_sent().unwrap();

        let err = notification.mark_sent().unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::NotificationAlreadySent));
    }

    #[test]
    fn read_before_send_is_rejected() {
        let mut notification = queued();

        assert!(notification.mark_read().is_err());
        assert_eq!(notification.status(), NotificationStatus::Queued);
    }

    #[test]
    fn second_read_records_nothing() {
        let mut notification = queued();
        notification.mark_sent().unwrap();
        notification.mark_read().unwrap();
        let events_after_first_read = notification.pending_events().len();

        notification.mark_read().unwrap();

        assert_eq!(notification.pending_events().len(), events_after_first_read);
    }
}
