//! Core data structures for Ballot.
//!
//! These are the canonical, request-scoped shapes every endpoint is coerced
//! into:
//! - Candidates and pages of candidates
//! - Governorates
//! - Aggregated statistics
//! - List query parameters

pub mod candidate;
pub mod governorate;
pub mod query;
pub mod stats;

pub use candidate::{Candidate, Gender, PaginatedCandidates};
pub use governorate::Governorate;
pub use query::CandidateQuery;
pub use stats::{GenderDistribution, Overview, Stats};
