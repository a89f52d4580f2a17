//! Note model definitions

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position of a note in the (flat) collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteKind {
    Main,
    Child,
}

impl Default for NoteKind {
    fn default() -> Self {
        Self::Main
    }
}

/// A note with rich-text content and tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Rich text markup, stored verbatim
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: NoteKind,
}

impl Note {
    /// Create a new note with the given title and content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            parent_id: None,
            kind: NoteKind::Main,
        }
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Aggregate counters over a note collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStats {
    pub total: u64,
    pub distinct_tags: u64,
}

impl NoteStats {
    pub fn collect(notes: &[Note]) -> Self {
        let tags: HashSet<&str> = notes
            .iter()
            .flat_map(|n| n.tags.iter().map(String::as_str))
            .collect();
        Self {
            total: notes.len() as u64,
            distinct_tags: tags.len() as u64,
        }
    }
}
