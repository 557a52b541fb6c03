//! Shared utilities

pub mod config;
pub mod context;
pub mod shell;
pub mod telemetry;

pub use config::{Config, RuntimeMode};
pub use context::GlobalContext;
pub use telemetry::{FallbackEvent, FallbackReason, Telemetry, TelemetrySink};
