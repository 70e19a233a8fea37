//! Webhook event envelope
//!
//! Lifecycle notifications arrive out-of-band as signed HTTP callbacks. The
//! envelope is ephemeral - it exists for one authenticated delivery attempt
//! and is never persisted by the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A verified webhook notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Delivery id assigned by the platform
    pub id: String,
    /// Dotted event type, e.g. `transaction.delivered`
    pub event: String,
    /// Event-specific payload
    pub data: serde_json::Value,
    /// When the platform emitted the event
    pub created_at: DateTime<Utc>,
}

impl WebhookEvent {
    /// True if this event is of the given dotted type
    pub fn is(&self, event_type: &str) -> bool {
        self.event == event_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_parses() {
        let json = r#"{
            "id": "evt_01",
            "event": "transaction.escrowed",
            "data": {"transaction_id": "clx0000001"},
            "created_at": "2026-03-01T12:00:00Z"
        }"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert!(event.is("transaction.escrowed"));
        assert_eq!(event.data["transaction_id"], "clx0000001");
    }
}
