//! Local draft persistence.
//!
//! One draft at a time lives in a single well-known slot of a [`Storage`].
//! The editor autosaves into it, offers it back on the next new-post session,
//! and clears it after a successful submission. Last writer wins.

mod storage;
mod tags;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use tags::TagList;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Storage key of the draft slot.
pub const DRAFT_KEY: &str = "draft_post";

/// In-progress state of a post being authored.
///
/// Every field is optional when reading so a partially written draft still
/// loads; missing values fall back to empty/false/0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: TagList,
    pub published: bool,
    pub blog_id: i64,
    /// Set when the draft is written to the slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Draft {
    /// Autosave only writes drafts that have both a title and a body.
    pub const fn is_autosave_eligible(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }

    #[must_use]
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.timestamp = Some(now);
        self
    }

    /// Blog id to select when restoring; 0 means the draft never had one.
    pub const fn blog_id_or(&self, fallback: i64) -> i64 {
        if self.blog_id == 0 {
            fallback
        } else {
            self.blog_id
        }
    }
}

/// The single draft slot over a storage backend.
#[derive(Debug, Clone)]
pub struct DraftSlot<S> {
    storage: S,
}

impl<S: Storage> DraftSlot<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Write `draft` into the slot stamped with `now`.
    ///
    /// # Errors
    /// Returns an error if the draft cannot be encoded or stored.
    pub fn save(&mut self, draft: &Draft, now: DateTime<Utc>) -> Result<Draft> {
        let stamped = draft.clone().stamped(now);
        let json = serde_json::to_string(&stamped).map_err(Error::DraftEncode)?;
        self.storage.set(DRAFT_KEY, &json)?;
        tracing::debug!(title = %stamped.title, "draft written to slot");
        Ok(stamped)
    }

    /// Read the slot, reporting unreadable or malformed content as an error.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read or its content is not
    /// a draft.
    pub fn try_load(&self) -> Result<Option<Draft>> {
        let Some(json) = self.storage.get(DRAFT_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(Error::DraftDecode)
    }

    /// Read the slot for recovery.
    ///
    /// Malformed or unreadable content counts as no draft. The slot itself
    /// is left alone so the content can still be inspected.
    pub fn load(&self) -> Option<Draft> {
        match self.try_load() {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!(%err, "ignoring stored draft");
                None
            }
        }
    }

    /// Empty the slot.
    ///
    /// # Errors
    /// Returns an error if the storage cannot be modified.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(DRAFT_KEY)?;
        tracing::debug!("draft slot cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn sample_draft() -> Draft {
        Draft {
            title: "Old".to_string(),
            content: "Body".to_string(),
            excerpt: String::new(),
            tags: ["x"].into_iter().collect(),
            published: false,
            blog_id: 1,
            timestamp: None,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_save_then_load_returns_stamped_draft() {
        let mut slot = DraftSlot::new(MemoryStorage::new());
        slot.save(&sample_draft(), fixed_now()).unwrap();

        let loaded = slot.load().unwrap();
        assert_eq!(loaded.title, "Old");
        assert_eq!(loaded.tags.as_slice(), ["x"]);
        assert_eq!(loaded.timestamp, Some(fixed_now()));
    }

    #[test]
    fn test_save_replaces_previous_draft() {
        let mut slot = DraftSlot::new(MemoryStorage::new());
        slot.save(&sample_draft(), fixed_now()).unwrap();
        let newer = Draft {
            title: "New".to_string(),
            ..sample_draft()
        };
        slot.save(&newer, fixed_now()).unwrap();
        assert_eq!(slot.load().unwrap().title, "New");
    }

    #[test]
    fn test_empty_slot_loads_none() {
        let slot = DraftSlot::new(MemoryStorage::new());
        assert!(slot.load().is_none());
        assert!(slot.try_load().unwrap().is_none());
    }

    #[test]
    fn test_clear_empties_slot() {
        let mut slot = DraftSlot::new(MemoryStorage::new());
        slot.save(&sample_draft(), fixed_now()).unwrap();
        slot.clear().unwrap();
        assert!(slot.load().is_none());
    }

    #[test]
    fn test_malformed_slot_loads_none_but_try_load_errors() {
        let slot = DraftSlot::new(MemoryStorage::with_entry(DRAFT_KEY, "{not json"));
        assert!(slot.load().is_none());
        assert!(matches!(slot.try_load(), Err(Error::DraftDecode(_))));
        // The bad content stays put.
        assert!(slot.storage().get(DRAFT_KEY).unwrap().is_some());
    }

    #[test]
    fn test_stored_keys_are_camel_case() {
        let mut slot = DraftSlot::new(MemoryStorage::new());
        slot.save(&sample_draft(), fixed_now()).unwrap();
        let json = slot.storage().get(DRAFT_KEY).unwrap().unwrap();
        assert!(json.contains(r#""blogId":1"#));
        assert!(json.contains(r#""timestamp":"2025-03-14T09:30:00Z""#));
    }

    #[test]
    fn test_partial_draft_fills_defaults() {
        let slot = DraftSlot::new(MemoryStorage::with_entry(
            DRAFT_KEY,
            r#"{"title":"Only a title"}"#,
        ));
        let draft = slot.load().unwrap();
        assert_eq!(draft.title, "Only a title");
        assert!(draft.content.is_empty());
        assert!(draft.tags.is_empty());
        assert_eq!(draft.blog_id, 0);
        assert_eq!(draft.blog_id_or(7), 7);
    }

    #[test]
    fn test_autosave_eligibility_needs_title_and_content() {
        let mut draft = sample_draft();
        assert!(draft.is_autosave_eligible());
        draft.content.clear();
        assert!(!draft.is_autosave_eligible());
        let untitled = Draft {
            title: String::new(),
            ..sample_draft()
        };
        assert!(!untitled.is_autosave_eligible());
    }

    #[test]
    fn test_file_backed_slot_survives_reopen() {
        let dir = tempdir().unwrap();
        let mut slot = DraftSlot::new(FileStorage::new(dir.path()));
        slot.save(&sample_draft(), fixed_now()).unwrap();

        let reopened = DraftSlot::new(FileStorage::new(dir.path()));
        assert_eq!(reopened.load().unwrap().content, "Body");
    }
}
