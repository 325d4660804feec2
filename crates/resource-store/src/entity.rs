//! # StoreEntity Trait
//!
//! The contract every remote resource (Product, Brand, Order, ...) implements to
//! be cached by a [`StoreActor`](crate::StoreActor). It names the identifier used
//! to splice entries in place and the partial-update payload the store knows how
//! to apply.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any cached entity must implement to be managed by a `StoreActor`.
///
/// # Identity
/// `collection` is unique by [`StoreEntity::id`]. Upserts, patches and removals
/// all locate their target by comparing ids, so the id must be stable for the
/// lifetime of the remote record (the server never reassigns it).
///
/// # Patches
/// Update operations only carry the fields the user changed. The store applies
/// them to the matching entry through [`StoreEntity::apply_patch`]; applying the
/// same patch twice must leave the entity in the same state as applying it once.
/// Entities that are never updated in place use `type Patch = ();`.
pub trait StoreEntity: Clone + Send + Sync + Debug + 'static {
    /// The unique identifier for this entity (e.g. `productID`, `orderCode`).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The partial-update payload accepted by [`StoreEntity::apply_patch`].
    type Patch: Clone + Send + Sync + Debug;

    /// Returns this entity's identifier.
    fn id(&self) -> Self::Id;

    /// Applies a partial update in place.
    fn apply_patch(&mut self, patch: &Self::Patch);
}
