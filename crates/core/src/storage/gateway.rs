//! Storage gateway
//!
//! Routes each collection read/write to the remote blob store or the local
//! file backend. Remote storage is used only when the selector asks for it
//! AND the API key AND that collection's bin id are all configured;
//! anything missing silently routes to the local file. Misconfiguration is
//! a routing decision, never an error.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::{BackendSelector, StorageConfig};
use super::{blob::BlobStoreClient, file, CollectionKind, CollectionStore};
use crate::Result;

/// Resolved backend for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRoute {
    Remote { bin_id: String, api_key: String },
    Local { path: PathBuf },
}

/// Pick the backend for a collection. Pure function of the configuration;
/// evaluated per request.
pub fn resolve_backend(config: &StorageConfig, kind: CollectionKind) -> BackendRoute {
    if config.backend == BackendSelector::JsonBin {
        if let (Some(api_key), Some(bin_id)) = (config.api_key.as_deref(), config.bin_id(kind)) {
            return BackendRoute::Remote {
                bin_id: bin_id.to_string(),
                api_key: api_key.to_string(),
            };
        }
        debug!(
            kind = kind.name(),
            "remote storage selected but not fully configured, using local file"
        );
    }
    BackendRoute::Local {
        path: config.file_path(kind),
    }
}

/// Gateway over the two storage backends
pub struct StorageGateway {
    config: StorageConfig,
    blob: BlobStoreClient,
}

impl StorageGateway {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            blob: BlobStoreClient::default(),
        }
    }

    /// Use a specific blob client (tests point this at a mock server).
    pub fn with_blob_client(config: StorageConfig, blob: BlobStoreClient) -> Self {
        Self { config, blob }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

#[async_trait]
impl CollectionStore for StorageGateway {
    async fn read(&self, kind: CollectionKind) -> Result<Vec<Value>> {
        match resolve_backend(&self.config, kind) {
            BackendRoute::Remote { bin_id, api_key } => {
                debug!(kind = kind.name(), bin_id, "reading collection from blob store");
                match self.blob.fetch_record(&bin_id, &api_key).await? {
                    Some(Value::Array(records)) => Ok(records),
                    Some(other) => {
                        warn!(
                            kind = kind.name(),
                            bin_id,
                            "stored record is not an array ({}), treating as empty",
                            json_type_name(&other)
                        );
                        Ok(Vec::new())
                    }
                    None => Ok(Vec::new()),
                }
            }
            BackendRoute::Local { path } => {
                debug!(kind = kind.name(), path = %path.display(), "reading collection from file");
                Ok(file::read_collection(&path).await)
            }
        }
    }

    async fn write(&self, kind: CollectionKind, records: &[Value]) -> Result<()> {
        match resolve_backend(&self.config, kind) {
            BackendRoute::Remote { bin_id, api_key } => {
                debug!(
                    kind = kind.name(),
                    bin_id,
                    count = records.len(),
                    "writing collection to blob store"
                );
                let record = Value::Array(records.to_vec());
                self.blob.put_record(&bin_id, &api_key, &record).await
            }
            BackendRoute::Local { path } => {
                debug!(
                    kind = kind.name(),
                    path = %path.display(),
                    count = records.len(),
                    "writing collection to file"
                );
                file::write_collection(&path, records).await
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
