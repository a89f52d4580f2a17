//! Storage configuration
//!
//! Read once at process start. Remote storage needs the API key and a bin id
//! per collection; anything missing means the affected collection silently
//! uses the local file backend instead.

use std::path::PathBuf;

use super::CollectionKind;

/// Which backend the deployment asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendSelector {
    /// Local JSON files under the data directory
    File,
    /// JSONBin remote blob store
    JsonBin,
}

/// Process-wide storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: BackendSelector,
    pub api_key: Option<String>,
    pub tasks_bin_id: Option<String>,
    pub notes_bin_id: Option<String>,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendSelector::File,
            api_key: None,
            tasks_bin_id: None,
            notes_bin_id: None,
            data_dir: PathBuf::from(".beedoo-data"),
        }
    }
}

impl StorageConfig {
    /// Read configuration from the environment.
    ///
    /// `STORAGE_TYPE` selects the backend (`jsonbin` or `file`, default
    /// `file`); `JSONBIN_API_KEY`, `JSONBIN_BIN_ID` and
    /// `JSONBIN_NOTES_BIN_ID` configure the remote store; `BEEDOO_DATA_DIR`
    /// overrides the local data directory. Unknown selector values fall back
    /// to `file`.
    pub fn from_env() -> Self {
        let backend = match env_nonempty("STORAGE_TYPE").as_deref() {
            Some("jsonbin") => BackendSelector::JsonBin,
            _ => BackendSelector::File,
        };

        Self {
            backend,
            api_key: env_nonempty("JSONBIN_API_KEY"),
            tasks_bin_id: env_nonempty("JSONBIN_BIN_ID"),
            notes_bin_id: env_nonempty("JSONBIN_NOTES_BIN_ID"),
            data_dir: env_nonempty("BEEDOO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".beedoo-data")),
        }
    }

    /// The configured bin id for a collection, if any.
    pub fn bin_id(&self, kind: CollectionKind) -> Option<&str> {
        match kind {
            CollectionKind::Tasks => self.tasks_bin_id.as_deref(),
            CollectionKind::Notes => self.notes_bin_id.as_deref(),
        }
    }

    /// The local file path for a collection.
    pub fn file_path(&self, kind: CollectionKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_file_backend() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, BackendSelector::File);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_bin_id_per_collection() {
        let config = StorageConfig {
            tasks_bin_id: Some("bin-t".into()),
            notes_bin_id: None,
            ..Default::default()
        };
        assert_eq!(config.bin_id(CollectionKind::Tasks), Some("bin-t"));
        assert_eq!(config.bin_id(CollectionKind::Notes), None);
    }

    #[test]
    fn test_file_path() {
        let config = StorageConfig {
            data_dir: PathBuf::from("/tmp/data"),
            ..Default::default()
        };
        assert_eq!(
            config.file_path(CollectionKind::Notes),
            PathBuf::from("/tmp/data/notes.json")
        );
    }
}
