//! # Store Errors
//!
//! Errors raised by the store plumbing itself, plus the trait operation errors
//! implement so a failed round trip can be reported to the store.

/// Errors that can occur while talking to a `StoreActor`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
}

/// Errors returned by async operations that settle into a store.
///
/// The store only keeps a string, so every failure must be able to describe
/// itself to an end user. Store plumbing failures are folded into the same
/// error type through `From<StoreError>`.
pub trait OperationFailure: From<StoreError> + Send + Sync + 'static {
    /// Best-effort human readable message for a notification or inline error.
    fn user_message(&self) -> String;
}
