//! The endpoint façade.
//!
//! Every `fetch_*` method is total: it returns either the backend's data in
//! canonical shape or a safe default. Transport and schema failures never
//! reach the caller; they are recorded through [`Telemetry`] instead.
//!
//! ```text
//! transport ──err──────────────────────────────┐
//!     │ok                                      ▼
//! normalize → validate ──err──> fallback + telemetry
//!                 │ok
//!                 ▼
//!            typed value
//! ```

use std::error::Error as StdError;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::core::{Candidate, CandidateQuery, Governorate, Overview, PaginatedCandidates, Stats};
use crate::ops::fallback;
use crate::ops::resource::Resource;
use crate::schema;
use crate::sources::{Endpoint, HttpTransport, Transport, TransportError};
use crate::util::config::Config;
use crate::util::telemetry::{FallbackReason, Telemetry};

/// Client for the candidate backend.
///
/// Holds no per-call state and can be shared between threads.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    telemetry: Telemetry,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, telemetry: Telemetry) -> Self {
        ApiClient {
            transport,
            telemetry,
        }
    }

    /// HTTP client with telemetry sinks taken from `config`.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport), Telemetry::from_config(config)))
    }

    /// One page of candidates.
    ///
    /// Pagination missing from the response is taken from `query`, then from
    /// the data itself, then from the defaults.
    pub fn fetch_candidates(&self, query: &CandidateQuery) -> PaginatedCandidates {
        self.fetch(
            &Endpoint::Candidates,
            &query.to_pairs(),
            Resource::Candidates,
            query,
            || fallback::candidates(query),
        )
    }

    /// A single candidate. The placeholder returned on failure keeps `id`.
    pub fn fetch_candidate_by_id(&self, id: &str) -> Candidate {
        self.fetch(
            &Endpoint::Candidate(id.to_string()),
            &[],
            Resource::Candidate,
            &CandidateQuery::default(),
            || fallback::candidate(id),
        )
    }

    pub fn fetch_trending(&self) -> Vec<Candidate> {
        self.fetch(
            &Endpoint::Trending,
            &[],
            Resource::Trending,
            &CandidateQuery::default(),
            fallback::trending,
        )
    }

    pub fn fetch_governorates(&self) -> Vec<Governorate> {
        self.fetch(
            &Endpoint::Governorates,
            &[],
            Resource::Governorates,
            &CandidateQuery::default(),
            fallback::governorates,
        )
    }

    pub fn fetch_stats(&self) -> Stats {
        self.fetch(
            &Endpoint::Stats,
            &[],
            Resource::Stats,
            &CandidateQuery::default(),
            fallback::stats,
        )
    }

    /// Stats, trending candidates and governorates, fetched concurrently.
    pub fn fetch_overview(&self) -> Overview {
        let (stats, (trending, governorates)) = rayon::join(
            || self.fetch_stats(),
            || rayon::join(|| self.fetch_trending(), || self.fetch_governorates()),
        );

        Overview {
            stats,
            trending,
            governorates,
        }
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &[(&'static str, String)],
        resource: Resource,
        query: &CandidateQuery,
        fallback: impl FnOnce() -> T,
    ) -> T {
        let raw = match self.transport.get(endpoint, params) {
            Ok(raw) => raw,
            Err(e) => {
                self.telemetry.record(
                    endpoint.route(),
                    FallbackReason::Network,
                    error_chain(&e),
                    None,
                );
                return fallback();
            }
        };

        let normalized = resource.normalize(raw, query);

        match schema::validate::<T>(resource.schema(), &normalized) {
            Ok(value) => {
                tracing::debug!("{} matched the {} schema", endpoint, resource);
                value
            }
            Err(violation) => {
                self.telemetry.record(
                    endpoint.route(),
                    FallbackReason::Validation,
                    violation.messages().join("; "),
                    Some(&normalized),
                );
                fallback()
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("transport", &self.transport.describe())
            .field("telemetry", &self.telemetry)
            .finish()
    }
}

/// `error: cause: cause` on one line.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
