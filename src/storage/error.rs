use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupted log at offset {offset}: {reason}")]
    Corrupted { offset: u64, reason: String },
}

impl StorageError {
    pub(crate) fn not_found(key: &[u8]) -> Self {
        StorageError::NotFound(String::from_utf8_lossy(key).into_owned())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
