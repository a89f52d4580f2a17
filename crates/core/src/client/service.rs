//! Collection service
//!
//! The interface the application consumes: `load()` and `save()` against a
//! collection endpoint, generic over the record type. Typed deserialization
//! rehydrates timestamp fields (recursively for nested task trees) from
//! their serialized string form.
//!
//! Saves are serialized per collection: at most one POST is in flight, and
//! a save requested meanwhile replaces the pending snapshot, so a slow
//! early save can never overwrite a newer one with stale content.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::storage::CollectionKind;
use crate::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client-observed synchronization state for one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Unloaded,
    Loading,
    Loaded,
    LoadFailed,
    Saving,
    SaveFailed,
}

struct SaveSlot<R> {
    in_flight: bool,
    pending: Option<Vec<R>>,
}

/// HTTP client for one collection endpoint
pub struct CollectionClient<R> {
    endpoint: String,
    http: reqwest::Client,
    state: Arc<RwLock<SyncState>>,
    slot: Arc<Mutex<SaveSlot<R>>>,
    _record: PhantomData<fn() -> R>,
}

impl<R> CollectionClient<R>
where
    R: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a client for the given collection on an api-server base URL
    /// (no trailing slash).
    pub fn new(base_url: impl AsRef<str>, kind: CollectionKind) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            endpoint: format!("{}/api/{}", base_url.as_ref(), kind.name()),
            http,
            state: Arc::new(RwLock::new(SyncState::Unloaded)),
            slot: Arc::new(Mutex::new(SaveSlot {
                in_flight: false,
                pending: None,
            })),
            _record: PhantomData,
        }
    }

    /// Current synchronization state.
    pub async fn state(&self) -> SyncState {
        *self.state.read().await
    }

    /// Load the full collection.
    ///
    /// A failure here means "go offline": it is surfaced to the caller, not
    /// converted to an empty collection. That defaulting happens only
    /// inside the storage backends behind the endpoint.
    pub async fn load(&self) -> Result<Vec<R>> {
        *self.state.write().await = SyncState::Loading;
        debug!(endpoint = %self.endpoint, "loading collection");

        let result = self.fetch().await;
        *self.state.write().await = match result {
            Ok(_) => SyncState::Loaded,
            Err(_) => SyncState::LoadFailed,
        };
        result
    }

    async fn fetch(&self) -> Result<Vec<R>> {
        let resp = self
            .http
            .get(&self.endpoint)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::Load(format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Load(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        resp.json::<Vec<R>>()
            .await
            .map_err(|e| Error::Load(format!("invalid response body: {}", e)))
    }

    /// Save the full collection.
    ///
    /// If a save is already in flight this snapshot is queued as pending,
    /// replacing any previously pending one, and the call returns
    /// immediately; the in-flight call drains it next. The caller holding
    /// the queue reports the outcome of the last snapshot posted. A failed
    /// save leaves the caller's in-memory collection untouched.
    pub async fn save(&self, records: &[R]) -> Result<()> {
        {
            let mut slot = self.slot.lock().await;
            if slot.in_flight {
                debug!(endpoint = %self.endpoint, "save in flight, coalescing snapshot");
                slot.pending = Some(records.to_vec());
                return Ok(());
            }
            slot.in_flight = true;
        }

        *self.state.write().await = SyncState::Saving;
        let mut current = records.to_vec();
        loop {
            let result = self.post(&current).await;
            if let Err(e) = &result {
                warn!(endpoint = %self.endpoint, error = %e, "save failed");
            }

            let next = {
                let mut slot = self.slot.lock().await;
                let next = slot.pending.take();
                if next.is_none() {
                    slot.in_flight = false;
                }
                next
            };
            match next {
                // A newer snapshot superseded this one; keep draining.
                Some(next) => current = next,
                None => {
                    *self.state.write().await = if result.is_ok() {
                        SyncState::Loaded
                    } else {
                        SyncState::SaveFailed
                    };
                    return result;
                }
            }
        }
    }

    async fn post(&self, records: &[R]) -> Result<()> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(records)
            .send()
            .await
            .map_err(|e| Error::Save(format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Save(format!("HTTP {}: {}", status.as_u16(), body)));
        }
        Ok(())
    }

    /// Probe the endpoint with a GET.
    pub async fn test_connection(&self) -> bool {
        match self.http.get(&self.endpoint).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}
