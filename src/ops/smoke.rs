//! Smoke checks against a live backend.
//!
//! Unlike the façade, smoke checks report failures instead of hiding them.
//! They answer one question: is the backend up and still speaking the
//! contract this client expects?

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::core::CandidateQuery;
use crate::ops::resource::Resource;
use crate::schema::{declared, Schema};
use crate::sources::{Endpoint, Transport};

/// What a probed response must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    /// The liveness body: `status: "ok"` or a `message`.
    Health,
    /// A façade resource, checked after normalization.
    Resource(Resource),
}

impl Contract {
    /// Check `body` against the declared schema, joining any issues.
    pub fn verify(self, body: Value) -> Result<(), String> {
        let (schema, value): (&Schema, Value) = match self {
            Contract::Health => (&*declared::HEALTH, body),
            Contract::Resource(resource) => (
                resource.schema(),
                resource.normalize(body, &CandidateQuery::default()),
            ),
        };

        let issues = schema.check(&value);
        if issues.is_empty() {
            return Ok(());
        }
        let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
        Err(messages.join("; "))
    }
}

/// One probe of one endpoint.
#[derive(Debug, Clone)]
pub struct SmokeCheck {
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub query: &'static [(&'static str, &'static str)],
    pub contract: Contract,
}

impl SmokeCheck {
    /// Request path with query, for display.
    pub fn target(&self) -> String {
        let mut target = self.endpoint.to_string();
        for (i, (key, value)) in self.query.iter().enumerate() {
            target.push(if i == 0 { '?' } else { '&' });
            target.push_str(&format!("{}={}", key, value));
        }
        target
    }

    pub fn run(&self, transport: &dyn Transport) -> SmokeResult {
        let start = Instant::now();
        let query: Vec<(&'static str, String)> = self
            .query
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect();

        let outcome = transport
            .get(&self.endpoint, &query)
            .map_err(|e| e.to_string())
            .and_then(|body| self.contract.verify(body));

        let elapsed = start.elapsed();
        tracing::debug!("smoke check {} finished in {:?}", self.name, elapsed);

        SmokeResult {
            name: self.name,
            target: self.target(),
            passed: outcome.is_ok(),
            detail: outcome.err(),
            elapsed,
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeResult {
    pub name: &'static str,
    pub target: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(d.as_millis())
}

/// Outcomes of every check, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    pub backend: String,
    pub results: Vec<SmokeResult>,
}

impl SmokeReport {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SmokeResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// The default probes.
pub fn default_checks() -> Vec<SmokeCheck> {
    vec![
        SmokeCheck {
            name: "health",
            endpoint: Endpoint::Health,
            query: &[],
            contract: Contract::Health,
        },
        SmokeCheck {
            name: "candidates",
            endpoint: Endpoint::Candidates,
            query: &[("limit", "2")],
            contract: Contract::Resource(Resource::Candidates),
        },
        SmokeCheck {
            name: "stats",
            endpoint: Endpoint::Stats,
            query: &[],
            contract: Contract::Resource(Resource::Stats),
        },
        SmokeCheck {
            name: "governorates",
            endpoint: Endpoint::Governorates,
            query: &[],
            contract: Contract::Resource(Resource::Governorates),
        },
    ]
}

/// Run `checks` in parallel, calling `on_done` as each one finishes.
pub fn run_checks(
    transport: &dyn Transport,
    checks: &[SmokeCheck],
    on_done: impl Fn(&SmokeResult) + Sync,
) -> SmokeReport {
    let results = checks
        .par_iter()
        .map(|check| {
            let result = check.run(transport);
            on_done(&result);
            result
        })
        .collect();

    SmokeReport {
        backend: transport.describe(),
        results,
    }
}

/// Run the default checks.
pub fn run(transport: &dyn Transport) -> SmokeReport {
    run_checks(transport, &default_checks(), |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn healthy_backend() -> Arc<MockTransport> {
        let mock = Arc::new(MockTransport::new());
        mock.respond(&Endpoint::Health, MockResponse::json(json!({ "status": "ok" })));
        mock.respond(&Endpoint::Candidates, MockResponse::json(data_envelope(2, 1, 2)));
        mock.respond(&Endpoint::Stats, MockResponse::json(stats_json()));
        mock.respond(&Endpoint::Governorates, MockResponse::json(governorates_json()));
        mock
    }

    #[test]
    fn test_all_pass() {
        let mock = healthy_backend();
        let report = run(&*mock);

        assert!(report.all_passed());
        let names: Vec<&str> = report.results.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["health", "candidates", "stats", "governorates"]);
        assert!(mock
            .requests()
            .contains(&"/api/candidates?limit=2".to_string()));
    }

    #[test]
    fn test_failures_are_reported() {
        let mock = healthy_backend();
        mock.respond(&Endpoint::Stats, MockResponse::json(json!({ "total": 1 })));
        mock.respond(&Endpoint::Health, MockResponse::server_error());

        let report = run(&*mock);

        assert!(!report.all_passed());
        let failed: Vec<&str> = report.failures().map(|r| r.name).collect();
        assert_eq!(failed, vec!["health", "stats"]);
        assert!(report.results[0].detail.as_deref().unwrap().contains("HTTP 500"));
        assert!(report.results[2]
            .detail
            .as_deref()
            .unwrap()
            .contains("total_candidates: missing required field"));
    }

    #[test]
    fn test_health_contract() {
        assert!(Contract::Health.verify(json!({ "message": "Backend running" })).is_ok());
        assert!(Contract::Health.verify(json!({ "status": "ok" })).is_ok());
        assert_eq!(
            Contract::Health.verify(json!({ "status": "down" })),
            Err("status: 'down' is not one of: ok".to_string())
        );
        assert!(Contract::Health.verify(json!({})).is_err());
    }

    #[test]
    fn test_resource_contract_reports_schema_issues() {
        let stats = Contract::Resource(Resource::Stats);
        assert!(stats.verify(json!({ "data": stats_json() })).is_ok());
        assert_eq!(
            stats.verify(json!({ "total_candidates": "many", "gender_distribution": { "Male": 1, "Female": 2 }, "candidates_per_governorate": [] })),
            Err("total_candidates: expected non-negative integer, found string".to_string())
        );

        let governorates = Contract::Resource(Resource::Governorates);
        assert!(governorates.verify(json!({ "data": governorates_json() })).is_ok());
        assert!(governorates.verify(json!({ "items": [] })).is_err());
    }

    #[test]
    fn test_on_done_called_per_check() {
        let mock = healthy_backend();
        let count = AtomicUsize::new(0);
        run_checks(&*mock, &default_checks(), |_| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_target_display() {
        let checks = default_checks();
        assert_eq!(checks[0].target(), "/health");
        assert_eq!(checks[1].target(), "/api/candidates?limit=2");
    }
}
