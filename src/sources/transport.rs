//! Transport trait - how the façade reaches the backend.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Backend endpoints known to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Candidates,
    Candidate(String),
    Trending,
    Governorates,
    Stats,
    Health,
}

impl Endpoint {
    /// Path segments below the base URL. Each segment is percent-encoded
    /// separately, so an id can never introduce extra path components.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Candidates => vec!["api", "candidates"],
            Endpoint::Candidate(id) => vec!["api", "candidates", id.as_str()],
            Endpoint::Trending => vec!["api", "candidates", "trending"],
            Endpoint::Governorates => vec!["api", "governorates"],
            Endpoint::Stats => vec!["api", "stats"],
            Endpoint::Health => vec!["health"],
        }
    }

    /// Route template used as the telemetry endpoint label.
    pub fn route(&self) -> &'static str {
        match self {
            Endpoint::Candidates => "/api/candidates",
            Endpoint::Candidate(_) => "/api/candidates/:id",
            Endpoint::Trending => "/api/candidates/trending",
            Endpoint::Governorates => "/api/governorates",
            Endpoint::Stats => "/api/stats",
            Endpoint::Health => "/health",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Query string pairs, in the order they are sent.
pub type QueryPairs = [(&'static str, String)];

/// Failure to obtain a JSON body from the backend.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not valid JSON")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Used by non-HTTP transports and test doubles.
    #[error("{url} is unreachable: {message}")]
    Unreachable { url: String, message: String },
}

/// Something that can GET a JSON document from the backend.
///
/// Implementations must be usable from several threads at once.
pub trait Transport: Send + Sync {
    /// Human-readable description of where requests go.
    fn describe(&self) -> String;

    /// GET `endpoint` with `query` and return the decoded JSON body.
    ///
    /// Any non-2xx status is an error.
    fn get(&self, endpoint: &Endpoint, query: &QueryPairs) -> Result<Value, TransportError>;
}
