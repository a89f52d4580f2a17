//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("remote store error: HTTP {status}: {body}")]
    RemoteStore { status: u16, body: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to load collection: {0}")]
    Load(String),

    #[error("failed to save collection: {0}")]
    Save(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
