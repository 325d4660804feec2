use crate::storage::{self, DurableStorage, PersistedRecord, StorageError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CartTransaction {
    transaction_number: String,
}

impl PersistedRecord for CartTransaction {
    const KEY: &'static str = "cart_transaction";
    const VERSION: u32 = 1;
}

/// The client-generated transaction number a cart is filed under.
///
/// Stable across reads and restarts until [`CartIdentity::regenerate`].
#[derive(Clone)]
pub struct CartIdentity {
    storage: Arc<dyn DurableStorage>,
    cached: Arc<Mutex<Option<String>>>,
}

impl CartIdentity {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self {
            storage,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// The current transaction number, created and persisted on first use.
    pub async fn current(&self) -> Result<String, StorageError> {
        let mut cached = self.cached.lock().await;
        if let Some(tx) = cached.as_ref() {
            return Ok(tx.clone());
        }

        let tx = match storage::load::<CartTransaction>(self.storage.as_ref()).await? {
            Some(record) => {
                debug!(transaction_number = %record.transaction_number, "Cart identity restored");
                record.transaction_number
            }
            None => self.issue().await?,
        };
        *cached = Some(tx.clone());
        Ok(tx)
    }

    /// Replaces the transaction number with a fresh one.
    ///
    /// The new number takes effect for this process even if it cannot be
    /// persisted.
    pub async fn regenerate(&self) -> Result<String, StorageError> {
        let mut cached = self.cached.lock().await;
        let tx = Uuid::new_v4().to_string();
        *cached = Some(tx.clone());
        self.persist(&tx).await?;
        Ok(tx)
    }

    async fn issue(&self) -> Result<String, StorageError> {
        let tx = Uuid::new_v4().to_string();
        self.persist(&tx).await?;
        Ok(tx)
    }

    async fn persist(&self, tx: &str) -> Result<(), StorageError> {
        storage::save(
            self.storage.as_ref(),
            &CartTransaction {
                transaction_number: tx.to_string(),
            },
        )
        .await?;
        info!(transaction_number = %tx, "Cart identity issued");
        Ok(())
    }
}
