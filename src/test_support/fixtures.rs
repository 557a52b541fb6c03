//! Canned backend payloads.
//!
//! The same candidates are served in each envelope style the backend has
//! used, so tests can check that every style normalizes to the same result.

use serde_json::{json, Value};

/// One fully-populated candidate.
pub fn candidate_json(id: &str, name: &str, gender: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "gender": gender,
        "governorate": "Baghdad",
        "party": "Civic Alliance",
        "nomination_type": "List",
        "ballot_number": 7
    })
}

/// Two valid candidates.
pub fn candidates_json() -> Vec<Value> {
    vec![
        candidate_json("c-1", "Zainab Hassan", "Female"),
        candidate_json("c-2", "Omar Khalid", "Male"),
    ]
}

/// `[ ... ]`
pub fn bare_array() -> Value {
    Value::Array(candidates_json())
}

/// `{ success, data, total, page, limit }`
pub fn data_envelope(total: u64, page: u32, limit: u32) -> Value {
    json!({
        "success": true,
        "data": candidates_json(),
        "total": total,
        "page": page,
        "limit": limit
    })
}

/// `{ success, result }`
pub fn result_envelope() -> Value {
    json!({ "success": true, "result": candidates_json() })
}

pub fn stats_json() -> Value {
    json!({
        "total_candidates": 7769,
        "gender_distribution": { "Male": 5000, "Female": 2769 },
        "candidates_per_governorate": [
            { "governorate": "Baghdad", "count": 1500 },
            { "governorate": "Basra", "count": 620 }
        ]
    })
}

pub fn governorates_json() -> Value {
    json!([
        { "id": "g-1", "name": "Baghdad", "nameArabic": "بغداد", "candidates_count": 1500 },
        { "id": "g-2", "nameArabic": "البصرة" }
    ])
}
