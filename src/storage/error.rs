use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Failed to encode record: {0}")]
    Encode(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Encode(e.to_string())
    }
}
