//! Offline contract checks.
//!
//! Runs a saved response through the same normalization and validation the
//! façade uses, but returns the schema issues instead of a fallback. Useful
//! for working out why a live endpoint keeps falling back.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::core::{Candidate, CandidateQuery, Governorate, PaginatedCandidates, Stats};
use crate::ops::resource::Resource;
use crate::schema::{self, SchemaViolation};

/// A payload that passed its schema, decoded into its typed model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Checked {
    Candidates(PaginatedCandidates),
    Candidate(Candidate),
    Trending(Vec<Candidate>),
    Governorates(Vec<Governorate>),
    Stats(Stats),
}

/// Normalize and validate `raw` as a response from `resource`.
pub fn check_payload(resource: Resource, raw: Value) -> Result<Checked, SchemaViolation> {
    let normalized = resource.normalize(raw, &CandidateQuery::default());
    let declared = resource.schema();

    let checked = match resource {
        Resource::Candidates => Checked::Candidates(schema::validate(declared, &normalized)?),
        Resource::Candidate => Checked::Candidate(schema::validate(declared, &normalized)?),
        Resource::Trending => Checked::Trending(schema::validate(declared, &normalized)?),
        Resource::Governorates => Checked::Governorates(schema::validate(declared, &normalized)?),
        Resource::Stats => Checked::Stats(schema::validate(declared, &normalized)?),
    };

    Ok(checked)
}

/// Read a saved JSON response from disk.
pub fn load_payload(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload: {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("payload is not valid JSON: {}", path.display()))
}
