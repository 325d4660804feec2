//! # Store Messages
//!
//! The message types exchanged between a [`StoreHandle`](crate::StoreHandle) and
//! its [`StoreActor`](crate::StoreActor).

use crate::entity::StoreEntity;
use crate::state::StoreSnapshot;
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel used by the store.
pub type Response<T> = oneshot::Sender<T>;

/// Proof that an operation was started, handed back on settlement.
///
/// `seq` is the per-operation sequence number assigned by `begin`; it is what
/// lets [`ConflictPolicy::LatestIssued`](crate::ConflictPolicy::LatestIssued)
/// recognise stale responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub op: &'static str,
    pub seq: u64,
}

/// How a successful response merges into the store.
#[derive(Debug, Clone)]
pub enum Outcome<T: StoreEntity> {
    /// Replace `collection` wholesale (fetch-all, fetch-by-filter).
    Replace(Vec<T>),
    /// Replace `current` (fetch-by-id, login).
    Current(Option<T>),
    /// Splice by id if present, otherwise append (create, full update).
    Upsert(T),
    /// Apply a partial update to the entry with this id.
    Patch(T::Id, T::Patch),
    /// Drop the entry with this id.
    Remove(T::Id),
    /// Acknowledged mutation with no client-side data change.
    Unchanged,
}

/// What the store did with a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// Older than the latest issued request for the same operation.
    Discarded,
}

/// Internal message type sent to the store actor.
///
/// Only three transitions ever reach a store: an operation starts, an
/// operation settles, or the store is explicitly reset. Reads go through
/// `Snapshot`, which hands back a copy of the current state.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Begin {
        op: &'static str,
        respond_to: Response<Ticket>,
    },
    Settle {
        ticket: Ticket,
        result: Result<Outcome<T>, String>,
        respond_to: Response<Settlement>,
    },
    Snapshot {
        respond_to: Response<StoreSnapshot<T>>,
    },
    Reset {
        respond_to: Response<()>,
    },
}
