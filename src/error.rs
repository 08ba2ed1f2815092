//! Error types for the storage and configuration seams.
//!
//! Neither error ever escapes a behavior group. Storage failures are logged
//! and turned into defaults; config failures fall back to built-in values.

/// Failure talking to the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("storage value is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed behavior configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {attribute}: {value:?}")]
    InvalidNumber { attribute: &'static str, value: String },
}
