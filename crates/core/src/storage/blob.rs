//! JSONBin blob store client
//!
//! Thin client for the JSONBin v3 document API. One attempt per call, no
//! retries; every request carries the master key and a bounded timeout.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.jsonbin.io/v3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the remote blob store
#[derive(Debug, Clone)]
pub struct BlobStoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for BlobStoreClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl BlobStoreClient {
    /// Create a client against the given API base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn bin_url(&self, bin_id: &str) -> String {
        format!("{}/b/{}", self.base_url, bin_id)
    }

    /// Fetch the stored record for a bin.
    ///
    /// Returns `Ok(None)` on HTTP 404: the bin was never written and the
    /// caller substitutes an empty collection. Any other non-success status
    /// is a [`Error::RemoteStore`] carrying status and body.
    pub async fn fetch_record(&self, bin_id: &str, api_key: &str) -> Result<Option<Value>> {
        let resp = self
            .http
            .get(self.bin_url(bin_id))
            .header("X-Master-Key", api_key)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(bin_id, "bin not found, treating as empty collection");
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::RemoteStore {
                status: status.as_u16(),
                body,
            });
        }

        // JSONBin wraps the document in a {record, metadata} envelope
        let envelope: Value = resp.json().await?;
        let record = match envelope.get("record") {
            Some(Value::Null) | None => Value::Array(Vec::new()),
            Some(record) => record.clone(),
        };
        Ok(Some(record))
    }

    /// Replace the stored record for a bin with the full collection.
    pub async fn put_record(&self, bin_id: &str, api_key: &str, record: &Value) -> Result<()> {
        let resp = self
            .http
            .put(self.bin_url(bin_id))
            .header("X-Master-Key", api_key)
            .header("Content-Type", "application/json")
            .json(record)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::RemoteStore {
                status: status.as_u16(),
                body,
            });
        }
        debug!(bin_id, "record written to blob store");
        Ok(())
    }
}
