//! # StoreClient Trait
//!
//! Common read/reset surface for resource-specific clients, built on top of the
//! [`StoreHandle`] each client wraps.
use crate::{OperationFailure, RequestState, StoreEntity, StoreHandle, StoreSnapshot};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit snapshot and reset.
///
/// Implementors only say where their handle lives and which error type their
/// operations return; `snapshot`, `status` and `reset` come for free.
#[async_trait]
pub trait StoreClient<T: StoreEntity>: Send + Sync {
    /// The client's operation error type.
    type Error: OperationFailure;

    /// Access the wrapped store handle.
    fn store(&self) -> &StoreHandle<T>;

    /// Copy of the store's current state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<StoreSnapshot<T>, Self::Error> {
        self.store().snapshot().await.map_err(Self::Error::from)
    }

    /// Request state of one named operation.
    #[tracing::instrument(skip(self))]
    async fn status(&self, op: &'static str) -> Result<RequestState, Self::Error> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot.state(op))
    }

    /// Clear the store back to its startup state.
    #[tracing::instrument(skip(self))]
    async fn reset(&self) -> Result<(), Self::Error> {
        tracing::debug!("Resetting store");
        self.store().reset().await.map_err(Self::Error::from)
    }
}
