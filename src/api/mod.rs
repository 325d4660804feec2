//! # Remote API
//!
//! Everything needed to talk to the shop backend: request descriptors, the
//! [`Transport`] seam with its `reqwest` implementation, the typed
//! [`ApiClient`] and the endpoint path builders.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod mock;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, GENERIC_FAILURE};
pub use request::{ApiPath, ApiRequest, ApiResponse, FilePart, FormData, HttpMethod, RequestBody};
pub use transport::{HttpTransport, Transport};
