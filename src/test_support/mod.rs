//! Test utilities and mocks for Ballot unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use ballot::test_support::{MockResponse, MockTransport};
//!
//! let mock = Arc::new(MockTransport::new());
//! mock.respond(&Endpoint::Stats, MockResponse::json(stats_json()));
//! let client = ApiClient::new(mock.clone(), Telemetry::new(RuntimeMode::Development));
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::ops::ApiClient;
use crate::sources::{Endpoint, QueryPairs, Transport, TransportError};
use crate::util::config::RuntimeMode;
use crate::util::telemetry::{FallbackEvent, MemorySink, Telemetry};

// Re-export fixtures for convenience
pub use fixtures::*;

/// What the mock backend does for one endpoint.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// 2xx with this JSON body.
    Json(Value),
    /// Non-2xx status.
    Status(u16),
    /// Connection failure.
    Unreachable,
}

impl MockResponse {
    pub fn json(body: Value) -> Self {
        MockResponse::Json(body)
    }

    pub fn server_error() -> Self {
        MockResponse::Status(500)
    }
}

/// In-memory transport with canned per-endpoint responses.
///
/// Endpoints without a response are unreachable. Every request is recorded as
/// `path?query`.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, MockResponse>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response for an endpoint.
    pub fn respond(&self, endpoint: &Endpoint, response: MockResponse) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(endpoint.to_string(), response);
        self
    }

    /// All requests made so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for MockTransport {
    fn describe(&self) -> String {
        "mock://backend".to_string()
    }

    fn get(&self, endpoint: &Endpoint, query: &QueryPairs) -> Result<Value, TransportError> {
        let path = endpoint.to_string();
        let query_string: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let request = if query_string.is_empty() {
            path.clone()
        } else {
            format!("{}?{}", path, query_string.join("&"))
        };
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let response = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&path)
            .cloned()
            .unwrap_or(MockResponse::Unreachable);

        let url = format!("mock://backend{}", path);
        match response {
            MockResponse::Json(body) => Ok(body),
            MockResponse::Status(status) => Err(TransportError::Status { url, status }),
            MockResponse::Unreachable => Err(TransportError::Unreachable {
                url,
                message: "connection refused".to_string(),
            }),
        }
    }
}

/// Fallback events captured by a test client.
///
/// Reads wait for the telemetry worker, so assertions see every event
/// recorded before them.
pub struct Recorder {
    sink: MemorySink,
    telemetry: Telemetry,
}

impl Recorder {
    pub fn events(&self) -> Vec<FallbackEvent> {
        self.telemetry.flush();
        self.sink.events()
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A client over `mock` that records fallbacks into the returned recorder.
pub fn mock_client(mock: &Arc<MockTransport>, mode: RuntimeMode) -> (ApiClient, Recorder) {
    let sink = MemorySink::new();
    let telemetry = Telemetry::new(mode).with_sink(Arc::new(sink.clone()));
    let recorder = Recorder {
        sink,
        telemetry: telemetry.clone(),
    };
    (ApiClient::new(mock.clone(), telemetry), recorder)
}
