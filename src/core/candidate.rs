//! Candidate records as served by the backend.
//!
//! The wire format is loose: only `id` is guaranteed. Every other field may be
//! missing or `null` and is filled with a placeholder on decode, so callers
//! always see a complete record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder name for candidates the backend could not describe.
pub const UNKNOWN_NAME: &str = "Unknown Candidate";

/// Placeholder governorate.
pub const UNKNOWN_GOVERNORATE: &str = "Unknown";

/// Placeholder party affiliation.
pub const INDEPENDENT_PARTY: &str = "Independent";

/// Placeholder nomination type.
pub const GENERAL_NOMINATION: &str = "General";

/// Candidate gender as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Wire names accepted by the schema validator.
    pub const NAMES: &'static [&'static str] = &["Male", "Female"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!(
                "invalid gender '{}'; expected 'Male' or 'Female'",
                s
            )),
        }
    }
}

/// A single election candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CandidateRecord")]
pub struct Candidate {
    /// Stable backend identifier
    pub id: String,

    /// Display name
    pub name: String,

    pub gender: Gender,

    /// Region the candidate is standing in
    pub governorate: String,

    /// Party affiliation (free text)
    pub party: String,

    pub nomination_type: String,

    /// Number printed on the ballot paper
    pub ballot_number: u64,
}

impl Candidate {
    /// A record carrying only an identifier; every other field holds its placeholder.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Candidate::from(CandidateRecord {
            id: id.into(),
            ..CandidateRecord::default()
        })
    }
}

/// Wire shape of a candidate, before placeholders are applied.
#[derive(Debug, Default, Deserialize)]
struct CandidateRecord {
    id: String,
    name: Option<String>,
    gender: Option<Gender>,
    governorate: Option<String>,
    party: Option<String>,
    nomination_type: Option<String>,
    ballot_number: Option<u64>,
}

impl From<CandidateRecord> for Candidate {
    fn from(record: CandidateRecord) -> Self {
        Candidate {
            id: record.id,
            name: record.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            gender: record.gender.unwrap_or_default(),
            governorate: record
                .governorate
                .unwrap_or_else(|| UNKNOWN_GOVERNORATE.to_string()),
            party: record.party.unwrap_or_else(|| INDEPENDENT_PARTY.to_string()),
            nomination_type: record
                .nomination_type
                .unwrap_or_else(|| GENERAL_NOMINATION.to_string()),
            ballot_number: record.ballot_number.unwrap_or(0),
        }
    }
}

/// Default page number when neither backend nor caller supplies one.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when neither backend, caller nor data supplies one.
pub const DEFAULT_LIMIT: u32 = 10;

/// One page of candidates.
///
/// `data.len() <= limit` is what the backend promises, but nothing here
/// relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PageRecord")]
pub struct PaginatedCandidates {
    pub data: Vec<Candidate>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl PaginatedCandidates {
    /// An empty page at the given position.
    pub fn empty(page: u32, limit: u32) -> Self {
        PaginatedCandidates {
            data: Vec::new(),
            total: 0,
            page,
            limit,
        }
    }

    /// Number of pages implied by `total` and `limit`.
    pub fn pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }
}

#[derive(Debug, Deserialize)]
struct PageRecord {
    data: Vec<Candidate>,
    total: u64,
    page: Option<u32>,
    limit: Option<u32>,
}

impl From<PageRecord> for PaginatedCandidates {
    fn from(record: PageRecord) -> Self {
        PaginatedCandidates {
            data: record.data,
            total: record.total,
            page: record.page.filter(|&p| p > 0).unwrap_or(DEFAULT_PAGE),
            limit: record.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_fills_missing_fields() {
        let candidate: Candidate = serde_json::from_value(json!({ "id": "c-1" })).unwrap();

        assert_eq!(candidate.id, "c-1");
        assert_eq!(candidate.name, UNKNOWN_NAME);
        assert_eq!(candidate.gender, Gender::Male);
        assert_eq!(candidate.governorate, UNKNOWN_GOVERNORATE);
        assert_eq!(candidate.party, INDEPENDENT_PARTY);
        assert_eq!(candidate.nomination_type, GENERAL_NOMINATION);
        assert_eq!(candidate.ballot_number, 0);
    }

    #[test]
    fn test_candidate_null_fields_use_placeholders() {
        let candidate: Candidate = serde_json::from_value(json!({
            "id": "c-2",
            "name": null,
            "party": null,
            "ballot_number": null
        }))
        .unwrap();

        assert_eq!(candidate.name, UNKNOWN_NAME);
        assert_eq!(candidate.party, INDEPENDENT_PARTY);
        assert_eq!(candidate.ballot_number, 0);
    }

    #[test]
    fn test_candidate_serializes_full_record() {
        let candidate = Candidate::placeholder("42");
        let value = serde_json::to_value(&candidate).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "42",
                "name": "Unknown Candidate",
                "gender": "Male",
                "governorate": "Unknown",
                "party": "Independent",
                "nomination_type": "General",
                "ballot_number": 0
            })
        );
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_page_defaults() {
        let page: PaginatedCandidates =
            serde_json::from_value(json!({ "data": [], "total": 0, "page": 0 })).unwrap();

        assert_eq!(page.page, DEFAULT_PAGE);
        assert_eq!(page.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_page_count() {
        let mut page = PaginatedCandidates::empty(1, 10);
        page.total = 21;
        assert_eq!(page.pages(), 3);

        page.total = 20;
        assert_eq!(page.pages(), 2);
    }
}
