//! Whole-collection storage
//!
//! Collections (all tasks, all notes) are persisted as single JSON arrays,
//! rewritten in full on every save. Two interchangeable backends exist: a
//! local JSON file and the JSONBin remote blob store. The gateway picks one
//! per request from the storage configuration.

pub mod blob;
pub mod config;
pub mod file;
pub mod gateway;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

pub use blob::BlobStoreClient;
pub use config::{BackendSelector, StorageConfig};
pub use gateway::{resolve_backend, BackendRoute, StorageGateway};

/// The two collection kinds, routed and persisted independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Tasks,
    Notes,
}

impl CollectionKind {
    /// File name under the data directory for the local backend
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks.json",
            Self::Notes => "notes.json",
        }
    }

    /// Lowercase name, used in routes and backup file names
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Notes => "notes",
        }
    }

    /// Capitalized label for user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tasks => "Tasks",
            Self::Notes => "Notes",
        }
    }
}

/// Storage interface for whole collections
///
/// A collection is an opaque JSON array at this boundary; reads of a
/// never-written collection yield an empty array, never an error.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Read the full collection.
    async fn read(&self, kind: CollectionKind) -> Result<Vec<Value>>;

    /// Replace the full collection.
    async fn write(&self, kind: CollectionKind, records: &[Value]) -> Result<()>;
}
