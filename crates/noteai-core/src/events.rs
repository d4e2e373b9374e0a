//! Note change events and the broadcast bus that carries them.
//!
//! The editor workflow emits on the bus after every successful write; the
//! note list workflow subscribes and refetches. Subscribers are independent,
//! and emitting with no subscribers is a no-op.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// A change to the set of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum NoteEvent {
    /// A note was created or updated.
    Saved {
        note_id: Uuid,
        created: bool,
        /// The write succeeded only after dropping summary/tags.
        metadata_dropped: bool,
    },
    /// A note was deleted.
    Deleted { note_id: Uuid },
}

impl NoteEvent {
    /// Dot-separated event type, used in logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            NoteEvent::Saved { created: true, .. } => "note.created",
            NoteEvent::Saved { created: false, .. } => "note.updated",
            NoteEvent::Deleted { .. } => "note.deleted",
        }
    }

    pub fn note_id(&self) -> Uuid {
        match self {
            NoteEvent::Saved { note_id, .. } | NoteEvent::Deleted { note_id } => *note_id,
        }
    }
}

/// Broadcast bus for [`NoteEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NoteEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    ///
    /// Recommended: 64 for an interactive session, 16 for tests.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all subscribers. Dropped silently if nobody listens.
    pub fn emit(&self, event: NoteEvent) {
        tracing::debug!(
            event_type = event.event_type(),
            note_id = %event.note_id(),
            subscriber_count = self.tx.receiver_count(),
            "EventBus emit"
        );
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events. Each subscriber gets its own independent stream.
    pub fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_emit_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(NoteEvent::Saved {
            note_id: Uuid::nil(),
            created: true,
            metadata_dropped: false,
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "note.created");
        assert_eq!(event.note_id(), Uuid::nil());
    }

    #[tokio::test]
    async fn test_event_bus_multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(NoteEvent::Deleted {
            note_id: Uuid::nil(),
        });

        assert!(matches!(rx1.recv().await.unwrap(), NoteEvent::Deleted { .. }));
        assert!(matches!(rx2.recv().await.unwrap(), NoteEvent::Deleted { .. }));
    }

    #[test]
    fn test_event_bus_no_subscribers_ok() {
        let bus = EventBus::new(16);
        bus.emit(NoteEvent::Deleted {
            note_id: Uuid::nil(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_json_serialization() {
        let event = NoteEvent::Saved {
            note_id: Uuid::nil(),
            created: false,
            metadata_dropped: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"Saved""#));
        assert!(json.contains(r#""metadata_dropped":true"#));
        assert_eq!(event.event_type(), "note.updated");
    }
}
