//! # Durable Client Storage
//!
//! Small JSON blobs kept across restarts (session, cart transaction number,
//! shipping selection), each under a fixed key and wrapped in a versioned
//! envelope:
//!
//! ```text
//! session.json            { "version": 1, "data": { "kind": "staff", ... } }
//! cart_transaction.json   { "version": 1, "data": { "transaction_number": "..." } }
//! shipping_selection.json { "version": 1, "data": { "country": ..., ... } }
//! ```
//!
//! A blob written by a different record version, or one that no longer
//! parses, reads back as absent.

pub mod envelope;
pub mod error;
pub mod file;
pub mod memory;

pub use envelope::{clear, load, save, PersistedRecord};
pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

/// A key/value store for raw JSON text.
#[async_trait]
pub trait DurableStorage: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn write(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Removing a key that was never written is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys are used as file names, so only `[A-Za-z0-9_-]` is allowed.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
