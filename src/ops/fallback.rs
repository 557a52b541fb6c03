//! Safe default values returned when a backend call cannot be trusted.
//!
//! Each default is a valid instance of its endpoint's type, so callers can
//! render it without special-casing failures.

use crate::core::candidate::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::core::{Candidate, CandidateQuery, Governorate, PaginatedCandidates, Stats};

/// An empty page at the requested position.
pub fn candidates(query: &CandidateQuery) -> PaginatedCandidates {
    PaginatedCandidates::empty(
        query.requested_page().unwrap_or(DEFAULT_PAGE),
        query.requested_limit().unwrap_or(DEFAULT_LIMIT),
    )
}

/// A placeholder candidate carrying the requested id.
pub fn candidate(id: &str) -> Candidate {
    Candidate::placeholder(id)
}

pub fn trending() -> Vec<Candidate> {
    Vec::new()
}

pub fn governorates() -> Vec<Governorate> {
    Vec::new()
}

/// All-zero statistics.
pub fn stats() -> Stats {
    Stats::default()
}
