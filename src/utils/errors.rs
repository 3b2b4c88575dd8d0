use thiserror::Error;

use crate::api::ApiError;

/// Errors that abort a snapshot build and end up on the error widget
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Price data unavailable: {0}")]
    DataUnavailable(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("RPC Error: {0}")]
    Rpc(String),
    #[error("{0}")]
    Transport(#[from] ApiError),
    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

/// Cache write failures. Logged by the caller, never propagated.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write cache file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
