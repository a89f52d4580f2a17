//! Core library for Beedoo
//!
//! This crate contains the storage subsystem and domain models, including:
//! - Task and note models (tasks form a nested tree)
//! - Storage backends (local JSON file, remote JSONBin blob store)
//! - The storage gateway that routes collections between backends
//! - The client-facing collection service

pub mod client;
pub mod error;
pub mod note;
pub mod storage;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
