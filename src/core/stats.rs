//! Pre-aggregated statistics and the landing-page overview.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::candidate::Candidate;
use crate::core::governorate::Governorate;

/// Candidate counts by gender. Exactly two keys on the wire: `Male`, `Female`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderDistribution {
    #[serde(rename = "Male")]
    pub male: u64,

    #[serde(rename = "Female")]
    pub female: u64,
}

/// Election-wide statistics, aggregated by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_candidates: u64,

    pub gender_distribution: GenderDistribution,

    /// Per-governorate counts. The backend has never fixed this shape, so the
    /// entries are passed through untouched.
    pub candidates_per_governorate: Vec<Value>,
}

/// Everything the landing page shows, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub stats: Stats,
    pub trending: Vec<Candidate>,
    pub governorates: Vec<Governorate>,
}
