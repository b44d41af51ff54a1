//! Journal store — mood-tagged entries, newest first. Fully persisted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{PersistedStore, StoreState};

/// Mood attached to a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Bad,
    Awful,
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::Bad => "bad",
            Self::Awful => "awful",
        };
        write!(f, "{s}")
    }
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub mood: Mood,
    pub content: String,
    pub tags: Vec<String>,
}

impl JournalEntry {
    pub fn new(mood: Mood, content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            mood,
            content: content.into(),
            tags,
        }
    }
}

/// Fields of a journal entry that can be edited after creation.
#[derive(Debug, Clone, Default)]
pub struct JournalPatch {
    pub mood: Option<Mood>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Journal store state. Fully persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalState {
    /// Entries ordered newest first.
    pub entries: Vec<JournalEntry>,
}

impl StoreState for JournalState {
    const NAME: &'static str = "journal_storage";
    type Projection = JournalState;

    fn project(&self) -> JournalState {
        self.clone()
    }

    fn merge(_defaults: Self, projection: JournalState) -> Self {
        projection
    }
}

/// Journal feature store.
pub type JournalStore = PersistedStore<JournalState>;

/// Domain operations over the journal store.
pub trait JournalOps {
    /// Prepend a new entry and return its id.
    fn add_entry(&self, mood: Mood, content: impl Into<String>, tags: Vec<String>) -> Uuid;
    /// Apply a patch to the entry with `id`. Unknown ids are ignored.
    fn update_entry(&self, id: Uuid, patch: JournalPatch);
    fn delete_entry(&self, id: Uuid);
    fn entry(&self, id: Uuid) -> Option<JournalEntry>;
}

impl JournalOps for Arc<JournalStore> {
    fn add_entry(&self, mood: Mood, content: impl Into<String>, tags: Vec<String>) -> Uuid {
        let entry = JournalEntry::new(mood, content, tags);
        let id = entry.id;
        self.update(move |mut s| {
            s.entries.insert(0, entry);
            s
        });
        id
    }

    fn update_entry(&self, id: Uuid, patch: JournalPatch) {
        self.update(move |mut s| {
            if let Some(entry) = s.entries.iter_mut().find(|e| e.id == id) {
                if let Some(mood) = patch.mood {
                    entry.mood = mood;
                }
                if let Some(content) = patch.content {
                    entry.content = content;
                }
                if let Some(tags) = patch.tags {
                    entry.tags = tags;
                }
            }
            s
        });
    }

    fn delete_entry(&self, id: Uuid) {
        self.update(move |mut s| {
            s.entries.retain(|e| e.id != id);
            s
        });
    }

    fn entry(&self, id: Uuid) -> Option<JournalEntry> {
        self.snapshot().entries.into_iter().find(|e| e.id == id)
    }
}
