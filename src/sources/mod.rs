//! Backend sources.
//!
//! A source fetches raw JSON from the election backend. The façade only
//! depends on the [`Transport`] trait; [`HttpTransport`] is the real one.

pub mod http;
pub mod transport;

pub use http::HttpTransport;
pub use transport::{Endpoint, QueryPairs, Transport, TransportError};
