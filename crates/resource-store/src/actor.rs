//! # Store Actor
//!
//! The `StoreActor` owns one [`StoreState`] and applies the messages sent by
//! its handles strictly in arrival order. It is the single writer for its
//! resource.

use crate::client::StoreHandle;
use crate::entity::StoreEntity;
use crate::message::{Settlement, StoreRequest};
use crate::state::{ConflictPolicy, StoreState};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that manages the cached copy of one remote resource.
///
/// # Concurrency Model
/// Async operations run concurrently on the runtime, but they never touch the
/// state directly: they send `Begin` before going to the network and `Settle`
/// when the response arrives. The actor processes those messages one at a
/// time, so the store needs no `Mutex` and transitions are never interleaved.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StoreActor::new()` returns the actor and a handle.
/// 2.  **Run**: spawn `actor.run()` on the runtime.
/// 3.  **Use**: clone the handle into whatever client issues operations.
///
/// The actor exits when the last handle is dropped.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    state: StoreState<T>,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreHandle`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full,
    /// handle calls wait for space.
    pub fn new(buffer_size: usize, policy: ConflictPolicy) -> (Self, StoreHandle<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: StoreState::new(policy),
        };
        (actor, StoreHandle::new(sender))
    }

    /// Runs the actor's event loop until every handle has been dropped.
    pub async fn run(mut self) {
        // "Product" rather than "shopfront::domain::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let policy = self.state.policy();
        info!(entity_type, %policy, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Begin { op, respond_to } => {
                    let ticket = self.state.begin(op);
                    debug!(entity_type, op, seq = ticket.seq, "Pending");
                    let _ = respond_to.send(ticket);
                }
                StoreRequest::Settle {
                    ticket,
                    result,
                    respond_to,
                } => {
                    let failed = result.as_ref().err().cloned();
                    let settlement = self.state.settle(ticket, result);
                    match (settlement, failed) {
                        (Settlement::Discarded, _) => {
                            debug!(
                                entity_type,
                                op = ticket.op,
                                seq = ticket.seq,
                                "Stale settlement discarded"
                            )
                        }
                        (Settlement::Applied, None) => {
                            debug!(
                                entity_type,
                                op = ticket.op,
                                seq = ticket.seq,
                                size = self.state.len(),
                                "Succeeded"
                            )
                        }
                        (Settlement::Applied, Some(error)) => {
                            warn!(entity_type, op = ticket.op, seq = ticket.seq, %error, "Failed")
                        }
                    }
                    let _ = respond_to.send(settlement);
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.state.snapshot());
                }
                StoreRequest::Reset { respond_to } => {
                    self.state.reset();
                    info!(entity_type, "Reset");
                    let _ = respond_to.send(());
                }
            }
        }

        info!(entity_type, size = self.state.len(), "Shutdown");
    }
}
