//! Startup, wiring and shutdown.
//!
//! - [`ShopSystem`] spawns one store actor per resource, wires the clients to
//!   them and owns the session and notification feed.
//! - [`setup_tracing`] installs the log subscriber.

pub mod shop_system;
pub mod tracing;

pub use shop_system::*;
pub use tracing::*;
