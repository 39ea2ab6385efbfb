//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for [`DomainEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use gradus_core::types::DbId;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

/// A reviewer was bound to a project.
pub const EVENT_REVIEWER_ASSIGNED: &str = "reviewer.assigned";

/// A committee member was bound to a project.
pub const EVENT_COMMITTEE_ASSIGNED: &str = "committee.assigned";

/// A reviewer or committee member was removed.
pub const EVENT_ASSIGNMENT_REMOVED: &str = "assignment.removed";

/// An evaluation was submitted or replaced.
pub const EVENT_EVALUATION_SUBMITTED: &str = "evaluation.submitted";

/// A defense session was booked.
pub const EVENT_DEFENSE_SCHEDULED: &str = "defense.scheduled";

/// An existing session was rebooked.
pub const EVENT_DEFENSE_RESCHEDULED: &str = "defense.rescheduled";

/// The defense took place.
pub const EVENT_DEFENSE_COMPLETED: &str = "defense.completed";

/// All required evaluations arrived and the final score was recorded.
pub const EVENT_PROJECT_COMPLETED: &str = "project.completed";

/// The project was abandoned before completion.
pub const EVENT_PROJECT_CANCELLED: &str = "project.cancelled";

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// A domain event describing one committed lifecycle mutation.
///
/// Constructed via [`DomainEvent::new`] and enriched with the builder
/// methods [`with_source`](DomainEvent::with_source),
/// [`with_actor`](DomainEvent::with_actor), and
/// [`with_payload`](DomainEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Dot-separated event name, e.g. `"defense.scheduled"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"project"`, `"defense_session"`).
    pub source_entity_type: Option<String>,

    /// Optional source entity database id.
    pub source_entity_id: Option<DbId>,

    /// Optional id of the teacher whose action triggered the event.
    pub actor_teacher_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    /// Create a new event with only the required `event_type`.
    ///
    /// All optional fields default to `None` / empty object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_teacher_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach a source entity to the event.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Attach the acting teacher to the event.
    pub fn with_actor(mut self, teacher_id: DbId) -> Self {
        self.actor_teacher_id = Some(teacher_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`DomainEvent`].
///
/// # Usage
///
/// ```rust
/// use gradus_events::bus::{DomainEvent, EventBus, EVENT_DEFENSE_SCHEDULED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DomainEvent::new(EVENT_DEFENSE_SCHEDULED));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    /// The persistence layer (when subscribed) ensures database capture.
    pub fn publish(&self, event: DomainEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = DomainEvent::new(EVENT_EVALUATION_SUBMITTED)
            .with_source("project", 42)
            .with_actor(7)
            .with_payload(serde_json::json!({"role": "reviewer", "score": 80.0}));

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, EVENT_EVALUATION_SUBMITTED);
        assert_eq!(received.source_entity_type.as_deref(), Some("project"));
        assert_eq!(received.source_entity_id, Some(42));
        assert_eq!(received.actor_teacher_id, Some(7));
        assert_eq!(received.payload["score"], 80.0);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(DomainEvent::new(EVENT_PROJECT_COMPLETED));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event_type, EVENT_PROJECT_COMPLETED);
        assert_eq!(e2.event_type, EVENT_PROJECT_COMPLETED);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        // No subscribers — this must not panic.
        bus.publish(DomainEvent::new(EVENT_DEFENSE_COMPLETED));
    }

    #[test]
    fn default_event_has_empty_optional_fields() {
        let event = DomainEvent::new(EVENT_DEFENSE_SCHEDULED);
        assert_eq!(event.event_type, EVENT_DEFENSE_SCHEDULED);
        assert!(event.source_entity_type.is_none());
        assert!(event.source_entity_id.is_none());
        assert!(event.actor_teacher_id.is_none());
        assert!(event.payload.is_object());
    }
}
