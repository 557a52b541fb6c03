//! Response shape normalization.
//!
//! The backend has returned lists in at least three envelope styles. Raw
//! responses are classified into a closed set of shapes and rewritten into the
//! one canonical shape each endpoint's schema expects. Nothing here fails:
//! shapes that cannot be recognized are passed through unchanged and left for
//! the validator to reject.

use serde_json::{json, Map, Value};

use crate::core::candidate::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::core::CandidateQuery;

/// Envelope styles observed from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RawShape {
    /// `[ ... ]`
    BareArray(Vec<Value>),

    /// `{ "data": [ ... ], ... }`
    DataEnvelope {
        data: Vec<Value>,
        envelope: Map<String, Value>,
    },

    /// `{ "success": true, "result": [ ... ], ... }`
    ResultEnvelope {
        result: Vec<Value>,
        envelope: Map<String, Value>,
    },

    /// Anything else.
    Unrecognized(Value),
}

impl RawShape {
    /// Classify a raw response body.
    pub fn classify(raw: Value) -> Self {
        let mut map = match raw {
            Value::Array(items) => return RawShape::BareArray(items),
            Value::Object(map) => map,
            other => return RawShape::Unrecognized(other),
        };

        match map.remove("data") {
            Some(Value::Array(data)) => {
                return RawShape::DataEnvelope {
                    data,
                    envelope: map,
                }
            }
            Some(other) => {
                map.insert("data".to_string(), other);
            }
            None => {}
        }

        if map.get("success") == Some(&Value::Bool(true)) {
            match map.remove("result") {
                Some(Value::Array(result)) => {
                    return RawShape::ResultEnvelope {
                        result,
                        envelope: map,
                    }
                }
                Some(other) => {
                    map.insert("result".to_string(), other);
                }
                None => {}
            }
        }

        RawShape::Unrecognized(Value::Object(map))
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            RawShape::BareArray(_) => "bare-array",
            RawShape::DataEnvelope { .. } => "data-envelope",
            RawShape::ResultEnvelope { .. } => "result-envelope",
            RawShape::Unrecognized(_) => "unrecognized",
        }
    }
}

/// Rewrite a candidates list response into `{data, total, page, limit}`.
///
/// Pagination precedence is backend value, then the requested parameter, then
/// a value computed from the data, then the constant default. Zero or
/// non-numeric values at any step count as absent.
pub fn candidate_page(raw: Value, query: &CandidateQuery) -> Value {
    let shape = RawShape::classify(raw);
    tracing::debug!("candidates response shape: {}", shape.label());

    match shape {
        RawShape::BareArray(items) => {
            let total = json!(items.len());
            page_value(items, total, None, None, query)
        }
        RawShape::DataEnvelope { data, envelope } => {
            let total = numeric(envelope.get("total")).unwrap_or_else(|| json!(data.len()));
            let page = positive(envelope.get("page"));
            let limit = positive(envelope.get("limit"));
            page_value(data, total, page, limit, query)
        }
        RawShape::ResultEnvelope { result, envelope } => {
            let total = numeric(envelope.get("total")).unwrap_or_else(|| json!(result.len()));
            page_value(result, total, None, None, query)
        }
        RawShape::Unrecognized(raw) => raw,
    }
}

fn page_value(
    data: Vec<Value>,
    total: Value,
    backend_page: Option<Value>,
    backend_limit: Option<Value>,
    query: &CandidateQuery,
) -> Value {
    let computed_limit = u32::try_from(data.len()).ok().filter(|&n| n > 0);

    let page = backend_page.unwrap_or_else(|| json!(query.requested_page().unwrap_or(DEFAULT_PAGE)));
    let limit = backend_limit.unwrap_or_else(|| {
        json!(query
            .requested_limit()
            .or(computed_limit)
            .unwrap_or(DEFAULT_LIMIT))
    });

    json!({
        "data": data,
        "total": total,
        "page": page,
        "limit": limit,
    })
}

/// Extract the array from any recognized list envelope.
pub fn list(raw: Value) -> Value {
    match RawShape::classify(raw) {
        RawShape::BareArray(items) => Value::Array(items),
        RawShape::DataEnvelope { data, .. } => Value::Array(data),
        RawShape::ResultEnvelope { result, .. } => Value::Array(result),
        RawShape::Unrecognized(raw) => raw,
    }
}

/// Unwrap a single entity from a `data` or `result` object envelope.
pub fn entity(raw: Value) -> Value {
    let Value::Object(mut map) = raw else {
        return raw;
    };

    if map.get("data").is_some_and(Value::is_object) {
        if let Some(inner) = map.remove("data") {
            return inner;
        }
    }

    let success = map.get("success") == Some(&Value::Bool(true));
    if success && map.get("result").is_some_and(Value::is_object) {
        if let Some(inner) = map.remove("result") {
            return inner;
        }
    }

    Value::Object(map)
}

fn numeric(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| v.is_number()).cloned()
}

/// A positive integer, or `None` so the next source is used.
fn positive(value: Option<&Value>) -> Option<Value> {
    value
        .and_then(Value::as_u64)
        .filter(|&n| n > 0)
        .map(Value::from)
}
