//! Session state: who is signed in and which cart they are filling.

pub mod cart_identity;
pub mod context;
pub mod role;

pub use cart_identity::CartIdentity;
pub use context::{SessionContext, SessionManager, SessionRecord};
pub use role::Role;
