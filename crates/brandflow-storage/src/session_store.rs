//! Session store - one JSON document per session.

use brandflow_models::{GeneratedBrand, Session, SessionEvent, SessionSummary, StoreStatistics};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// File-backed session store.
///
/// Construct exactly one per process (the composition root holds it in an
/// `Arc`); the store itself keeps no in-memory state beyond the root path,
/// so every operation reads from and rewrites the on-disk record.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        tracing::info!(root = %root.display(), "session store opened");
        Ok(Self { root })
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn session_path(&self, session_id: &str) -> PathBuf {
        self.root.join(format!("{session_id}.json"))
    }

    fn save(&self, session: &Session) -> Result<()> {
        let path = self.session_path(&session.session_id);
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| StoreError::InvalidUpdate(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Create and immediately persist a fresh session.
    pub fn create(&self, user_id: &str, metadata: Map<String, Value>) -> Result<Session> {
        let session = Session::new(user_id, metadata);
        self.save(&session)?;
        tracing::info!(session_id = %session.session_id, user_id, "created session");
        Ok(session)
    }

    /// Load a session by ID.
    ///
    /// Returns [`StoreError::NotFound`] if no record exists and
    /// [`StoreError::Corrupt`] if the record exists but does not parse.
    pub fn get(&self, session_id: &str) -> Result<Session> {
        let path = self.session_path(session_id);
        if !path.exists() {
            return Err(StoreError::NotFound(session_id.to_string()));
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            id: session_id.to_string(),
            source,
        })
    }

    /// Merge a partial-fields patch into a stored session.
    ///
    /// `session_id` and `created_at` are immutable and silently skipped;
    /// `updated_at` is refreshed after the merge regardless of the patch.
    pub fn update(&self, session_id: &str, patch: Map<String, Value>) -> Result<Session> {
        let session = self.get(session_id)?;

        let serde_json::Value::Object(mut object) = serde_json::to_value(&session)
            .map_err(|e| StoreError::InvalidUpdate(e.to_string()))?
        else {
            return Err(StoreError::InvalidUpdate(
                "session did not serialize to an object".to_string(),
            ));
        };
        for (key, field) in patch {
            if key == "session_id" || key == "created_at" {
                continue;
            }
            object.insert(key, field);
        }

        let mut merged: Session = serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| StoreError::InvalidUpdate(e.to_string()))?;
        merged.touch();
        self.save(&merged)?;
        tracing::debug!(session_id, "updated session");
        Ok(merged)
    }

    /// Append an event to a session and re-persist it.
    pub fn add_event(
        &self,
        session_id: &str,
        event_type: &str,
        author: &str,
        content: &str,
        metadata: Map<String, Value>,
    ) -> Result<SessionEvent> {
        let mut session = self.get(session_id)?;
        let event = SessionEvent::new(event_type, author, content, metadata);
        session.events.push(event.clone());
        session.touch();
        self.save(&session)?;
        tracing::debug!(session_id, event_type, "added event");
        Ok(event)
    }

    /// Append a generated brand record to a session and re-persist it.
    pub fn add_generated_brand(
        &self,
        session_id: &str,
        attributes: Map<String, Value>,
    ) -> Result<GeneratedBrand> {
        let mut session = self.get(session_id)?;
        let brand = GeneratedBrand::new(attributes);
        session.generated_brands.push(brand.clone());
        session.touch();
        self.save(&session)?;
        tracing::info!(
            session_id,
            brand = brand.name().unwrap_or("unknown"),
            "added generated brand"
        );
        Ok(brand)
    }

    /// List session summaries, newest update first.
    ///
    /// Unreadable records are logged and skipped; a listing never fails on a
    /// single bad file.
    pub fn list(&self, user_id: Option<&str>, limit: usize) -> Result<Vec<SessionSummary>> {
        let mut summaries = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let session: Session = match fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|raw| serde_json::from_str(&raw).map_err(anyhow::Error::from))
            {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable session record");
                    continue;
                }
            };
            if let Some(user) = user_id
                && session.user_id != user
            {
                continue;
            }
            summaries.push(session.summary());
        }

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries.truncate(limit);
        Ok(summaries)
    }

    /// Delete a session record. Returns `false` when no record exists.
    pub fn delete(&self, session_id: &str) -> Result<bool> {
        let path = self.session_path(session_id);
        if !path.exists() {
            tracing::warn!(session_id, "session not found for deletion");
            return Ok(false);
        }
        fs::remove_file(path)?;
        tracing::info!(session_id, "deleted session");
        Ok(true)
    }

    /// Aggregate counts over every stored record.
    ///
    /// Scans the whole storage root; fine for the small corpora this store
    /// serves, not meant for high-volume deployments.
    pub fn statistics(&self) -> Result<StoreStatistics> {
        let mut stats = StoreStatistics {
            total_sessions: 0,
            total_brands: 0,
            total_events: 0,
            unique_users: 0,
            storage_root: self.root.display().to_string(),
        };
        let mut users = HashSet::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(raw) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(session) = serde_json::from_str::<Session>(&raw) else {
                continue;
            };
            stats.total_sessions += 1;
            stats.total_brands += session.generated_brands.len();
            stats.total_events += session.events.len();
            users.insert(session.user_id);
        }

        stats.unique_users = users.len();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_and_get_round_trip() {
        let (_dir, store) = store();
        let session = store.create("alice", Map::new()).unwrap();

        let loaded = store.get(&session.session_id).unwrap();
        assert_eq!(loaded.session_id, session.session_id);
        assert_eq!(loaded.user_id, "alice");
        assert!(loaded.events.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_append_order() {
        let (_dir, store) = store();
        let session = store.create("alice", Map::new()).unwrap();
        let id = &session.session_id;

        for content in ["first", "second", "third"] {
            store
                .add_event(id, "message", "user", content, Map::new())
                .unwrap();
        }
        for name in ["Lumina", "Vexa"] {
            let mut attrs = Map::new();
            attrs.insert("brand_name".into(), json!(name));
            store.add_generated_brand(id, attrs).unwrap();
        }

        let loaded = store.get(id).unwrap();
        assert_eq!(loaded.events.len(), 3);
        assert_eq!(loaded.generated_brands.len(), 2);
        let contents: Vec<_> = loaded.events.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
        assert_eq!(loaded.generated_brands[0].name(), Some("Lumina"));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.get("no-such-session").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_get_corrupt_record_is_distinct_error() {
        let (dir, store) = store();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let err = store.get("broken").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_update_protects_immutable_fields() {
        let (_dir, store) = store();
        let session = store.create("alice", Map::new()).unwrap();

        let mut patch = Map::new();
        patch.insert("session_id".into(), json!("hijacked"));
        patch.insert("created_at".into(), json!("1999-01-01T00:00:00Z"));
        patch.insert("metadata".into(), json!({"phase": "review"}));

        let updated = store.update(&session.session_id, patch).unwrap();
        assert_eq!(updated.session_id, session.session_id);
        assert_eq!(updated.created_at, session.created_at);
        assert_eq!(updated.metadata["phase"], "review");
        assert!(updated.updated_at >= session.updated_at);
    }

    #[test]
    fn test_update_missing_session_fails() {
        let (_dir, store) = store();
        let err = store.update("ghost", Map::new()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_list_filters_sorts_and_truncates() {
        let (_dir, store) = store();
        let a = store.create("alice", Map::new()).unwrap();
        let _b = store.create("bob", Map::new()).unwrap();
        let c = store.create("alice", Map::new()).unwrap();

        // Touch the older alice session so it sorts first.
        store
            .add_event(&a.session_id, "message", "user", "bump", Map::new())
            .unwrap();

        let all = store.list(None, 10).unwrap();
        assert_eq!(all.len(), 3);

        let alice = store.list(Some("alice"), 10).unwrap();
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[0].session_id, a.session_id);
        assert_eq!(alice[1].session_id, c.session_id);

        let limited = store.list(None, 1).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].session_id, a.session_id);
    }

    #[test]
    fn test_delete_reports_absence() {
        let (_dir, store) = store();
        let session = store.create("alice", Map::new()).unwrap();

        assert!(store.delete(&session.session_id).unwrap());
        assert!(!store.delete(&session.session_id).unwrap());
        assert!(matches!(
            store.get(&session.session_id).unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn test_statistics_scans_all_records() {
        let (dir, store) = store();
        let a = store.create("alice", Map::new()).unwrap();
        store.create("bob", Map::new()).unwrap();
        store
            .add_event(&a.session_id, "message", "user", "hi", Map::new())
            .unwrap();
        let mut attrs = Map::new();
        attrs.insert("brand_name".into(), json!("Lumina"));
        store.add_generated_brand(&a.session_id, attrs).unwrap();

        // Corrupt files are skipped, not counted.
        fs::write(dir.path().join("junk.json"), "oops").unwrap();

        let stats = store.statistics().unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_events, 1);
        assert_eq!(stats.total_brands, 1);
        assert_eq!(stats.unique_users, 2);
    }
}
