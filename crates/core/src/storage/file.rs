//! Local file backend
//!
//! One JSON file per collection under the data directory, holding the
//! literal array of records with 2-space indentation. Reads never fail the
//! caller: a missing, unreadable or malformed file reads as an empty
//! collection. Writes propagate errors.

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::Result;

/// Read the full collection from `path`.
///
/// A missing file or parent directory is the zero state and yields an empty
/// vec. Other read or parse failures also yield an empty vec, after a warn
/// log; the read path trades durability for availability.
pub async fn read_collection(path: &Path) -> Vec<Value> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read collection file, returning empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed collection file, returning empty");
            Vec::new()
        }
    }
}

/// Overwrite the collection file at `path` with the full record array.
///
/// Creates the parent directory if absent. The content is written to a
/// sibling temp file first and renamed into place, so a crash leaves either
/// the old or the new content, never a truncated file.
pub async fn write_collection(path: &Path, records: &[Value]) -> Result<()> {
    let content = serde_json::to_string_pretty(records)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("tasks.json");
        assert!(read_collection(&path).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.json");
        tokio::fs::write(&path, "{not json").await.unwrap();
        assert!(read_collection(&path).await.is_empty());
    }

    #[tokio::test]
    async fn test_write_creates_parent_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deep").join("dir").join("tasks.json");
        let records = vec![json!({"id": "1", "title": "Buy milk"})];

        write_collection(&path, &records).await.unwrap();
        assert_eq!(read_collection(&path).await, records);

        // 2-space indented array on disk
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.starts_with("[\n  {"));
    }

    #[tokio::test]
    async fn test_write_overwrites_wholesale() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.json");

        write_collection(&path, &[json!({"id": "1"}), json!({"id": "2"})])
            .await
            .unwrap();
        write_collection(&path, &[json!({"id": "3"})]).await.unwrap();

        let records = read_collection(&path).await;
        assert_eq!(records, vec![json!({"id": "3"})]);
    }

    #[tokio::test]
    async fn test_write_empty_collection() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        write_collection(&path, &[]).await.unwrap();
        assert_eq!(read_collection(&path).await, Vec::<Value>::new());
    }
}
