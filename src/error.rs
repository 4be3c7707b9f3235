use thiserror::Error;

/// Errors that can occur while restoring a stored draft
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("stored content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stored content is not a valid document: {0}")]
    InvalidContent(String),
}

/// Errors that can occur while writing to the key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("writing `{key}` would exceed the storage quota of {quota} bytes")]
    QuotaExceeded { key: String, quota: usize },

    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
