//! Session domain model.
//!
//! A session tracks one user's brainstorming run: an append-only event log
//! plus the brands generated along the way. Events and brands are immutable
//! once appended; their ordering is append order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A brainstorming session owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID v4).
    pub session_id: String,
    /// Owning user identifier.
    pub user_id: String,
    /// Creation timestamp. Immutable after creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
    /// Open metadata blob; downstream consumers add ad-hoc fields.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Append-only event log.
    #[serde(default)]
    pub events: Vec<SessionEvent>,
    /// Append-only generated brand records.
    #[serde(default)]
    pub generated_brands: Vec<GeneratedBrand>,
}

impl Session {
    /// Create a fresh session with empty event/brand lists.
    pub fn new(user_id: impl Into<String>, metadata: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            created_at: now,
            updated_at: now,
            metadata,
            events: Vec::new(),
            generated_brands: Vec::new(),
        }
    }

    /// Refresh the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Build a listing summary with derived counts.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            event_count: self.events.len(),
            brand_count: self.generated_brands.len(),
        }
    }
}

/// A single immutable entry in the session event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub event_id: String,
    /// Free-form type tag ("message", "generation", "compaction", ...).
    pub event_type: String,
    /// Who produced the event ("user" or an agent name).
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl SessionEvent {
    pub fn new(
        event_type: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
        metadata: Map<String, Value>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            event_type: event_type.into(),
            author: author.into(),
            content: content.into(),
            timestamp: Utc::now(),
            metadata,
        }
    }
}

/// A generated brand record.
///
/// The attribute blob is deliberately schema-less (name, rationale, tagline,
/// scores, whatever an agent attaches); it is flattened into the record so
/// the persisted JSON reads as one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedBrand {
    pub brand_id: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl GeneratedBrand {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self {
            brand_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            attributes,
        }
    }

    /// The brand name attribute, if the generating agent set one.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("brand_name").and_then(Value::as_str)
    }
}

/// Listing view of a session; counts are derived at listing time, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub event_count: usize,
    pub brand_count: usize,
}

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStatistics {
    pub total_sessions: usize,
    pub total_brands: usize,
    pub total_events: usize,
    pub unique_users: usize,
    pub storage_root: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_session_starts_empty() {
        let session = Session::new("alice", Map::new());
        assert!(session.events.is_empty());
        assert!(session.generated_brands.is_empty());
        assert_eq!(session.created_at, session.updated_at);
    }

    #[test]
    fn brand_attributes_flatten_into_record() {
        let mut attrs = Map::new();
        attrs.insert("brand_name".into(), json!("Lumina"));
        attrs.insert("rationale".into(), json!("latin root for light"));
        let brand = GeneratedBrand::new(attrs);

        let value = serde_json::to_value(&brand).unwrap();
        assert_eq!(value["brand_name"], "Lumina");
        assert!(value["brand_id"].is_string());

        let back: GeneratedBrand = serde_json::from_value(value).unwrap();
        assert_eq!(back.name(), Some("Lumina"));
    }

    #[test]
    fn summary_counts_are_derived() {
        let mut session = Session::new("bob", Map::new());
        session
            .events
            .push(SessionEvent::new("message", "user", "hello", Map::new()));
        let summary = session.summary();
        assert_eq!(summary.event_count, 1);
        assert_eq!(summary.brand_count, 0);
    }
}
