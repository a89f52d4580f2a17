//! Application state

use std::sync::Arc;

use beedoo_core::storage::{StorageConfig, StorageGateway};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    gateway: StorageGateway,
}

impl AppState {
    /// Create a new AppState over the given storage configuration
    pub fn new(config: StorageConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                gateway: StorageGateway::new(config),
            }),
        }
    }

    /// Wrap an existing gateway (tests inject one pointed at temp dirs)
    pub fn with_gateway(gateway: StorageGateway) -> Self {
        Self {
            inner: Arc::new(AppStateInner { gateway }),
        }
    }

    /// Get reference to the storage gateway
    pub fn gateway(&self) -> &StorageGateway {
        &self.inner.gateway
    }
}
