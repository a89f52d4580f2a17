//! Client-facing collection service

pub mod service;

pub use service::{CollectionClient, SyncState};
