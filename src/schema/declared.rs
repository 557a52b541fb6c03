//! Declared schemas for each backend endpoint.

use std::sync::LazyLock;

use crate::core::Gender;
use crate::schema::{ObjectSchema, Schema};

fn candidate() -> ObjectSchema {
    ObjectSchema::new()
        .required("id", Schema::String)
        .optional("name", Schema::String)
        .optional("gender", Schema::OneOf(Gender::NAMES))
        .optional("governorate", Schema::String)
        .optional("party", Schema::String)
        .optional("nomination_type", Schema::String)
        .optional("ballot_number", Schema::Count)
}

fn governorate() -> ObjectSchema {
    ObjectSchema::new()
        .optional("id", Schema::String)
        .optional("name", Schema::String)
        .optional("nameArabic", Schema::String)
        .optional("candidates_count", Schema::Count)
        .at_least_one_of(&["name", "nameArabic"])
}

/// A single candidate.
pub static CANDIDATE: LazyLock<Schema> = LazyLock::new(|| candidate().into());

/// A flat list of candidates (trending).
pub static CANDIDATE_LIST: LazyLock<Schema> = LazyLock::new(|| Schema::array_of(candidate()));

/// The canonical candidates page.
pub static CANDIDATE_PAGE: LazyLock<Schema> = LazyLock::new(|| {
    ObjectSchema::new()
        .required("data", Schema::array_of(candidate()))
        .required("total", Schema::Count)
        .optional("page", Schema::Count)
        .optional("limit", Schema::Count)
        .into()
});

pub static GOVERNORATE_LIST: LazyLock<Schema> =
    LazyLock::new(|| Schema::array_of(governorate()));

pub static STATS: LazyLock<Schema> = LazyLock::new(|| {
    ObjectSchema::new()
        .required("total_candidates", Schema::Count)
        .required(
            "gender_distribution",
            ObjectSchema::new()
                .required("Male", Schema::Count)
                .required("Female", Schema::Count)
                .into(),
        )
        .required("candidates_per_governorate", Schema::array_of(Schema::Any))
        .into()
});

/// Backend liveness probe.
pub static HEALTH: LazyLock<Schema> = LazyLock::new(|| {
    ObjectSchema::new()
        .optional("status", Schema::OneOf(&["ok"]))
        .optional("message", Schema::String)
        .at_least_one_of(&["status", "message"])
        .into()
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_requires_only_id() {
        assert!(CANDIDATE.check(&json!({ "id": "1" })).is_empty());
        assert_eq!(CANDIDATE.check(&json!({ "name": "x" })).len(), 1);
    }

    #[test]
    fn test_candidate_rejects_unknown_gender() {
        let issues = CANDIDATE.check(&json!({ "id": "1", "gender": "M" }));
        assert_eq!(issues[0].to_string(), "gender: 'M' is not one of: Male, Female");
    }

    #[test]
    fn test_page_requires_total() {
        let issues = CANDIDATE_PAGE.check(&json!({ "data": [] }));
        assert_eq!(issues[0].to_string(), "total: missing required field");
    }

    #[test]
    fn test_stats_shape() {
        assert!(STATS
            .check(&json!({
                "total_candidates": 3,
                "gender_distribution": { "Male": 2, "Female": 1 },
                "candidates_per_governorate": [{ "anything": true }, 4]
            }))
            .is_empty());

        let issues = STATS.check(&json!({
            "total_candidates": 3,
            "gender_distribution": { "Male": 2 },
            "candidates_per_governorate": []
        }));
        assert_eq!(
            issues[0].to_string(),
            "gender_distribution.Female: missing required field"
        );
    }

    #[test]
    fn test_governorate_needs_a_name() {
        assert!(GOVERNORATE_LIST.check(&json!([{ "nameArabic": "نينوى" }])).is_empty());
        assert_eq!(GOVERNORATE_LIST.check(&json!([{ "id": "g1" }])).len(), 1);
    }
}
