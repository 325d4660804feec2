//! # Store Handle
//!
//! The cloneable sender side of a store. Async operations use it to report
//! their lifecycle; views use it to read snapshots.

use crate::entity::StoreEntity;
use crate::error::{OperationFailure, StoreError};
use crate::message::{Outcome, Settlement, StoreRequest, Ticket};
use crate::state::StoreSnapshot;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle for interacting with a `StoreActor`.
///
/// Holds only a channel sender, so cloning is cheap and handles can be moved
/// into spawned tasks freely.
pub struct StoreHandle<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> Clone for StoreHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StoreEntity> StoreHandle<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn begin(&self, op: &'static str) -> Result<Ticket, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Begin { op, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    pub async fn settle(
        &self,
        ticket: Ticket,
        result: Result<Outcome<T>, String>,
    ) -> Result<Settlement, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Settle {
                ticket,
                result,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    pub async fn snapshot(&self) -> Result<StoreSnapshot<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    pub async fn reset(&self) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Reset { respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    /// Runs one async operation against this store.
    ///
    /// Marks `op` pending, awaits `work` (which should perform exactly one
    /// network round trip), then settles the store: `merge` decides how a
    /// successful value lands in the store, a failure is recorded with its
    /// [`OperationFailure::user_message`]. The caller gets the value or the
    /// error back unchanged.
    ///
    /// `work` is not polled until the store has acknowledged `begin`, so the
    /// request is always issued after the operation is marked pending.
    pub async fn run<R, E, Fut, M>(&self, op: &'static str, work: Fut, merge: M) -> Result<R, E>
    where
        E: OperationFailure,
        Fut: Future<Output = Result<R, E>>,
        M: FnOnce(&R) -> Outcome<T>,
    {
        let ticket = self.begin(op).await?;
        match work.await {
            Ok(value) => {
                self.settle(ticket, Ok(merge(&value))).await?;
                Ok(value)
            }
            Err(error) => {
                self.settle(ticket, Err(error.user_message())).await?;
                Err(error)
            }
        }
    }
}
