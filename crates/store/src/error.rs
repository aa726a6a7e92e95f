//! Error types shared by every store backend.

use thiserror::Error;

/// Errors surfaced by a store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the requested slug.
    #[error("article not found: {0}")]
    NotFound(String),

    /// A stored record or a caller-supplied value could not be decoded.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The backend rejected a write that collides with an existing record.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The operation is not offered by this backend.
    #[error("operation '{0}' is not supported by this backend")]
    Unsupported(&'static str),

    /// Any other failure from the underlying filesystem or remote table,
    /// message passed through verbatim.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
