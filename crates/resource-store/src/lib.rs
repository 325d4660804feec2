//! # Resource Store
//!
//! Building blocks for client-side resource caches that mirror a remote REST
//! collection. Every remote entity type (products, brands, orders, ...) gets one
//! [`StoreActor`] that owns its state, and any number of cloneable
//! [`StoreHandle`]s that talk to it over a channel.
//!
//! ## Why one actor per resource?
//!
//! The store is the only shared mutable state in the client. Running it as an
//! actor means every transition is applied by a single task, one message at a
//! time, so no lock ever guards the collection. Async operations suspend on
//! network I/O *outside* the actor and only come back to it to report an
//! outcome.
//!
//! ## The request lifecycle
//!
//! Each named operation (`"products"`, `"salesOrder"`, `"checkout"`, ...) has its
//! own [`RequestState`]:
//!
//! ```text
//! Idle ──begin──► Pending ──settle(Ok)──► Succeeded ──begin──► Pending ...
//!                    │
//!                    └──settle(Err)──► Failed ──begin──► Pending ...
//! ```
//!
//! A successful settlement carries an [`Outcome`] describing how the response
//! merges into the store: full replacement, `current` assignment, upsert,
//! patch or removal by identifier. A failed settlement carries a
//! human-readable message and leaves `collection`/`current` untouched.
//!
//! ## Overlapping requests
//!
//! By default ([`ConflictPolicy::LastWriteWins`]) every settlement is applied
//! in arrival order, so whichever response lands last wins even if it was
//! issued first. [`ConflictPolicy::LatestIssued`] tags each `begin` with a
//! sequence number and drops settlements that are older than the most
//! recently issued request for the same operation.
//!
//! ## Example
//!
//! ```rust
//! use resource_store::{Outcome, RequestState, StoreActor, StoreEntity, ConflictPolicy};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Brand { id: String, name: String }
//!
//! impl StoreEntity for Brand {
//!     type Id = String;
//!     type Patch = String;
//!     fn id(&self) -> String { self.id.clone() }
//!     fn apply_patch(&mut self, name: &String) { self.name = name.clone(); }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, store) = StoreActor::<Brand>::new(8, ConflictPolicy::default());
//!     tokio::spawn(actor.run());
//!
//!     let ticket = store.begin("brands").await.unwrap();
//!     let list = vec![Brand { id: "b1".into(), name: "Acme".into() }];
//!     store.settle(ticket, Ok(Outcome::Replace(list))).await.unwrap();
//!
//!     let snapshot = store.snapshot().await.unwrap();
//!     assert_eq!(snapshot.state("brands"), RequestState::Succeeded);
//!     assert_eq!(snapshot.collection.len(), 1);
//! }
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod state;

pub use actor::StoreActor;
pub use client::StoreHandle;
pub use client_trait::StoreClient;
pub use entity::StoreEntity;
pub use error::{OperationFailure, StoreError};
pub use message::{Outcome, Response, Settlement, StoreRequest, Ticket};
pub use state::{
    ConflictPolicy, OperationStatus, RequestState, StoreFailure, StoreSnapshot, StoreState,
};
