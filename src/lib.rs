//! # Shopfront
//!
//! > **Client core for a multi-role e-commerce frontend.**
//!
//! Customers browse the storefront and check out a cart. Staff sign in to
//! one of four panels (admin, agent, content, fulfillment) that manage the
//! catalog and move orders through their life cycle. Everything talks to a
//! remote REST API; this crate owns the client-side state, the requests and
//! the pure derivations that views render from.
//!
//! ## 🏗️ Design
//!
//! ### One store per resource
//! Every remote collection (products, brands, orders, cart lines, ...) is
//! mirrored by a [`StoreActor`](resource_store::StoreActor) from the
//! `resource-store` crate. A store is the only writer of its state and
//! tracks a `Pending`/`Succeeded`/`Failed` lifecycle per named operation, so
//! a view can show a spinner for `"salesOrder"` while `"orders"` is already
//! rendered.
//!
//! ### Operations suspend outside the store
//! A client operation marks its operation pending, awaits exactly one HTTP
//! request, and comes back to the store only to settle. Nothing holds a lock
//! across the network.
//!
//! ### Failures are values
//! Every failure is normalized into a [`ClientError`](clients::ClientError)
//! with a user-facing message; the store records it and the caller gets it
//! back. No operation panics on a bad response.
//!
//! ## 🗺️ Module Tour
//!
//! - [`api`]: requests, the HTTP transport, endpoint paths and
//!   [`MockTransport`](api::mock::MockTransport) for tests.
//! - [`domain`]: serde models of the backend resources and their create and
//!   update payloads.
//! - [`clients`]: one client per resource; each pairs the API with the
//!   store(s) it reports to.
//! - [`session`]: the persisted sign-in, roles and the cart transaction id.
//! - [`router`]: picks the shell to mount from the session.
//! - [`view`]: filtering, sorting, paging, formatting and dashboard buckets.
//! - [`storage`]: durable key/value records behind a trait.
//! - [`notifications`]: WebSocket notification feed for the staff panels.
//! - [`config`]: TOML + environment configuration.
//! - [`runtime`]: [`ShopSystem`](runtime::ShopSystem) wires it all together.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Point the demo at a backend and watch the store transitions
//! SHOPFRONT_API_URL=http://localhost:5000/api RUST_LOG=debug cargo run
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod domain;
pub mod notifications;
pub mod router;
pub mod runtime;
pub mod session;
pub mod storage;
pub mod view;
