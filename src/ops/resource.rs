//! The resources the façade knows how to read.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::core::CandidateQuery;
use crate::ops::normalize;
use crate::schema::{declared, Schema};

/// A backend resource together with its normalization and schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Candidates,
    Candidate,
    Trending,
    Governorates,
    Stats,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Candidates,
        Resource::Candidate,
        Resource::Trending,
        Resource::Governorates,
        Resource::Stats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Candidates => "candidates",
            Resource::Candidate => "candidate",
            Resource::Trending => "trending",
            Resource::Governorates => "governorates",
            Resource::Stats => "stats",
        }
    }

    /// Schema the normalized value must satisfy.
    pub fn schema(&self) -> &'static Schema {
        match self {
            Resource::Candidates => &declared::CANDIDATE_PAGE,
            Resource::Candidate => &declared::CANDIDATE,
            Resource::Trending => &declared::CANDIDATE_LIST,
            Resource::Governorates => &declared::GOVERNORATE_LIST,
            Resource::Stats => &declared::STATS,
        }
    }

    /// Rewrite a raw response into this resource's canonical shape.
    ///
    /// `query` only matters for [`Resource::Candidates`].
    pub fn normalize(&self, raw: Value, query: &CandidateQuery) -> Value {
        match self {
            Resource::Candidates => normalize::candidate_page(raw, query),
            Resource::Candidate | Resource::Stats => normalize::entity(raw),
            Resource::Trending | Resource::Governorates => normalize::list(raw),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Resource::ALL.iter().map(|r| r.name()).collect();
                format!("unknown endpoint '{}'; expected one of: {}", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse() {
        assert_eq!("stats".parse::<Resource>().unwrap(), Resource::Stats);
        assert_eq!("Trending".parse::<Resource>().unwrap(), Resource::Trending);

        let err = "votes".parse::<Resource>().unwrap_err();
        assert!(err.contains("candidates, candidate, trending, governorates, stats"));
    }

    #[test]
    fn test_normalize_dispatch() {
        let query = CandidateQuery::new();
        let list = json!({ "data": [{ "id": "1" }] });

        assert_eq!(
            Resource::Trending.normalize(list.clone(), &query),
            json!([{ "id": "1" }])
        );
        assert_eq!(
            Resource::Candidates.normalize(list, &query)["total"],
            json!(1)
        );
        assert_eq!(
            Resource::Stats.normalize(json!({ "data": { "total_candidates": 1 } }), &query),
            json!({ "total_candidates": 1 })
        );
    }
}
