//! HTTP transport over a blocking `reqwest` client.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::sources::transport::{Endpoint, QueryPairs, Transport, TransportError};
use crate::util::config::Config;

const USER_AGENT: &str = concat!("ballot/", env!("CARGO_PKG_VERSION"));

/// Talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(TransportError::Client)?;

        Ok(HttpTransport { base, client })
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::new(config.base_url(), config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Full URL for `endpoint` with `query` appended.
    pub fn url_for(&self, endpoint: &Endpoint, query: &QueryPairs) -> Url {
        let mut url = self.base.clone();

        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        url
    }
}

impl Transport for HttpTransport {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    fn get(&self, endpoint: &Endpoint, query: &QueryPairs) -> Result<Value, TransportError> {
        let url = self.url_for(endpoint, query);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    TransportError::Request {
                        url: url.to_string(),
                        source: e,
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|e| TransportError::Request {
            url: url.to_string(),
            source: e,
        })?;

        tracing::debug!("{} returned {} bytes", url, body.len());

        serde_json::from_slice(&body).map_err(|e| TransportError::Decode {
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_url_for_joins_segments() {
        let t = transport("http://localhost:4001");
        assert_eq!(
            t.url_for(&Endpoint::Stats, &[]).as_str(),
            "http://localhost:4001/api/stats"
        );

        // A trailing slash or path prefix on the base is kept.
        let t = transport("https://example.org/backend/");
        assert_eq!(
            t.url_for(&Endpoint::Trending, &[]).as_str(),
            "https://example.org/backend/api/candidates/trending"
        );
    }

    #[test]
    fn test_url_for_encodes_id_and_query() {
        let t = transport("http://localhost:4001");
        let url = t.url_for(
            &Endpoint::Candidate("a/b c".into()),
            &[("query", "علي".to_string())],
        );
        assert_eq!(url.path(), "/api/candidates/a%2Fb%20c");
        assert_eq!(url.query_pairs().next().unwrap().1, "علي");

        let url = t.url_for(
            &Endpoint::Candidates,
            &[("page", "2".to_string()), ("limit", "5".to_string())],
        );
        assert_eq!(url.query(), Some("page=2&limit=5"));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            HttpTransport::new("not a url", Duration::from_secs(1)),
            Err(TransportError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpTransport::new("mailto:someone@example.org", Duration::from_secs(1)),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.api.base_url = Some("http://backend:9000".into());
        let t = HttpTransport::from_config(&config).unwrap();
        assert_eq!(t.describe(), "http://backend:9000/");
    }
}
