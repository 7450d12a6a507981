use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Event kind representing a code push
pub const PUSH_EVENT: &str = "PushEvent";

/// A timestamped activity record from a member's public events feed
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: Payload,
    #[serde(default)]
    pub actor: Actor,
}

/// Only the payload size matters, and only for push events where it is the commit count
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub login: String,
}

impl Event {
    #[must_use]
    pub fn is_push(&self) -> bool {
        self.kind == PUSH_EVENT
    }

    /// The UTC calendar day the event was created on
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_event_deserialize() {
        let json = r#"{
            "id": "1",
            "type": "PushEvent",
            "actor": { "id": 1, "login": "octocat" },
            "repo": { "name": "octocat/hello" },
            "payload": { "push_id": 7, "size": 3, "distinct_size": 3, "commits": [] },
            "public": true,
            "created_at": "2024-01-01T10:00:00Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.is_push());
        assert_eq!(event.payload.size, 3);
        assert_eq!(event.actor.login, "octocat");
        assert_eq!(event.day(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_other_event_without_size() {
        let json = r#"{
            "type": "WatchEvent",
            "actor": { "login": "octocat" },
            "payload": { "action": "started" },
            "created_at": "2024-01-01T10:00:00Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(!event.is_push());
        assert_eq!(event.payload.size, 0);
    }

    #[test]
    fn test_day_normalizes_to_utc() {
        let json = r#"{ "type": "PushEvent", "created_at": "2024-01-01T22:30:00-05:00" }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.day(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!(event.actor.login.is_empty());
    }

    #[test]
    fn test_missing_created_at_is_rejected() {
        let json = r#"{ "type": "PushEvent" }"#;
        let _ = serde_json::from_str::<Event>(json).unwrap_err();
    }
}
