//! Ballot - a fault-tolerant client for the candidate information backend.
//!
//! This crate provides the core library functionality for Ballot, including
//! response normalization, schema validation, fallbacks and fallback
//! telemetry.

pub mod core;
pub mod ops;
pub mod schema;
pub mod sources;
pub mod util;

/// Test utilities and mocks for Ballot unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides an in-memory transport and canned payloads.
#[cfg(test)]
pub mod test_support;

pub use core::{Candidate, CandidateQuery, Gender, Governorate, PaginatedCandidates, Stats};
pub use ops::ApiClient;
pub use sources::{HttpTransport, Transport, TransportError};
pub use util::context::GlobalContext;
