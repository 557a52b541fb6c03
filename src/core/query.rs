//! Query parameters for the candidate list endpoint.

use serde::{Deserialize, Serialize};

use crate::core::candidate::Gender;

/// Filters and pagination for `GET /api/candidates`.
///
/// Absent parameters are not sent. A zero `page` or `limit` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,

    /// Free-text search
    pub query: Option<String>,
    pub governorate: Option<String>,
    pub gender: Option<Gender>,

    /// Backend-defined sort key
    pub sort: Option<String>,
}

impl CandidateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_governorate(mut self, governorate: impl Into<String>) -> Self {
        self.governorate = Some(governorate.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// The page the caller asked for, if it is usable.
    pub fn requested_page(&self) -> Option<u32> {
        self.page.filter(|&p| p > 0)
    }

    /// The page size the caller asked for, if it is usable.
    pub fn requested_limit(&self) -> Option<u32> {
        self.limit.filter(|&l| l > 0)
    }

    /// Query string pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(page) = self.requested_page() {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.requested_limit() {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("query", query.to_string()));
        }
        if let Some(governorate) = self.governorate.as_deref().filter(|g| !g.is_empty()) {
            pairs.push(("governorate", governorate.to_string()));
        }
        if let Some(gender) = self.gender {
            pairs.push(("gender", gender.to_string()));
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sort", sort.to_string()));
        }

        pairs
    }
}
