//! High-level operations.
//!
//! This module contains the request pipeline behind every Ballot command:
//! normalization, fallbacks, the endpoint façade, smoke checks and offline
//! contract checks.

pub mod api;
pub mod check;
pub mod fallback;
pub mod normalize;
pub mod resource;
pub mod smoke;

pub use api::ApiClient;
pub use check::{check_payload, load_payload, Checked};
pub use normalize::RawShape;
pub use resource::Resource;
pub use smoke::{SmokeCheck, SmokeReport, SmokeResult};
