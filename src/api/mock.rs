//! # Mock Transport
//!
//! Utilities for testing clients without a server.
//!
//! Queue expectations with [`MockTransport::expect`], hand
//! [`MockTransport::transport`] to an [`ApiClient`](super::ApiClient), then call
//! [`MockTransport::verify`] once the test is done. Requests that match no
//! expectation panic.
//!
//! An expectation can be held back with
//! [`ExpectationBuilder::hold_until`] so tests decide the order in which
//! overlapping requests settle.
//!
//! # Example
//! ```ignore
//! let mock = MockTransport::new();
//! mock.expect(HttpMethod::Get, "/Brand/Get-Brand")
//!     .respond_json(json!([{"brandId": "b1", "brandName": "Acme"}]));
//!
//! let api = ApiClient::new(mock.transport());
//! // Use api in tests...
//! mock.verify();
//! ```

use super::error::ApiError;
use super::request::{ApiRequest, ApiResponse, HttpMethod};
use super::transport::Transport;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{oneshot, Notify};

struct Expectation {
    method: HttpMethod,
    path: String,
    gate: Option<oneshot::Receiver<()>>,
    response: Result<ApiResponse, ApiError>,
}

#[derive(Default)]
struct MockState {
    expectations: Mutex<VecDeque<Expectation>>,
    requests: Mutex<Vec<ApiRequest>>,
    arrived: Notify,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An expectation-driven stand-in for the remote API.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Expects one request with this method and path (as rendered by
    /// [`ApiPath`](super::ApiPath)'s `Display`).
    pub fn expect(&self, method: HttpMethod, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            state: self.state.clone(),
            method,
            path: path.into(),
            gate: None,
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.state.requests).clone()
    }

    /// Waits until at least `count` requests have arrived.
    pub async fn wait_for_requests(&self, count: usize) {
        loop {
            let arrived = self.state.arrived.notified();
            if lock(&self.state.requests).len() >= count {
                return;
            }
            arrived.await;
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.state.expectations);
        if !remaining.is_empty() {
            let pending: Vec<String> = remaining
                .iter()
                .map(|e| format!("{} {}", e.method, e.path))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                remaining.len(),
                pending
            );
        }
    }
}

/// Builder for a single expectation. Nothing is queued until a `respond_*`
/// or `fail_*` method is called.
pub struct ExpectationBuilder {
    state: Arc<MockState>,
    method: HttpMethod,
    path: String,
    gate: Option<oneshot::Receiver<()>>,
}

impl ExpectationBuilder {
    /// Holds the response back until `gate` fires (or its sender is dropped).
    pub fn hold_until(mut self, gate: oneshot::Receiver<()>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn respond_json(self, body: serde_json::Value) {
        self.respond_status(200, body.to_string());
    }

    pub fn respond_empty(self) {
        self.respond_status(200, String::new());
    }

    pub fn respond_status(self, status: u16, body: impl Into<String>) {
        let body = body.into();
        self.push(Ok(ApiResponse { status, body }));
    }

    pub fn fail_transport(self, message: impl Into<String>) {
        let message = message.into();
        self.push(Err(ApiError::Transport(message)));
    }

    fn push(self, response: Result<ApiResponse, ApiError>) {
        lock(&self.state.expectations).push_back(Expectation {
            method: self.method,
            path: self.path,
            gate: self.gate,
            response,
        });
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request.path.to_string();
        let expectation = {
            let mut expectations = lock(&self.state.expectations);
            let position = expectations
                .iter()
                .position(|e| e.method == request.method && e.path == path);
            match position.and_then(|index| expectations.remove(index)) {
                Some(expectation) => expectation,
                None => panic!("Unexpected request: {} {}", request.method, path),
            }
        };

        lock(&self.state.requests).push(request);
        self.state.arrived.notify_waiters();

        if let Some(gate) = expectation.gate {
            let _ = gate.await;
        }
        expectation.response
    }
}
