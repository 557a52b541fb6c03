//! Configuration file support for Ballot.
//!
//! Ballot supports two configuration file locations:
//! - Global: `~/.ballot/config.toml` - User-wide defaults
//! - Project: `.ballot/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Environment variables
//! and command-line flags are applied on top by the binary, so the library
//! only ever sees one resolved `Config`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4001";

/// Maximum characters of a payload sample kept by telemetry. Configured
/// limits above this are clamped.
pub const MAX_SAMPLE_LIMIT: usize = 1024;

/// Request timeout applied by the HTTP transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Ballot configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API settings
    pub api: ApiConfig,

    /// Runtime settings
    pub runtime: RuntimeConfig,

    /// Fallback telemetry settings
    pub telemetry: TelemetryConfig,

    /// Network settings
    pub net: NetConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., http://localhost:4001)
    pub base_url: Option<String>,
}

/// Whether the process runs in development or production.
///
/// Production mode strips payload samples from telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    pub fn is_production(&self) -> bool {
        matches!(self, RuntimeMode::Production)
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeMode::Development => write!(f, "development"),
            RuntimeMode::Production => write!(f, "production"),
        }
    }
}

impl FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(RuntimeMode::Development),
            "production" | "prod" => Ok(RuntimeMode::Production),
            _ => Err(format!(
                "invalid runtime mode '{}'; expected 'development' or 'production'",
                s
            )),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Runtime mode (development, production)
    pub mode: Option<RuntimeMode>,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Maximum payload sample length in characters (development only)
    pub sample_limit: Option<usize>,

    /// Append fallback events as JSON lines to this file
    pub log_file: Option<PathBuf>,
}

/// Network-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.api.base_url.is_some() {
            self.api.base_url = other.api.base_url;
        }

        if other.runtime.mode.is_some() {
            self.runtime.mode = other.runtime.mode;
        }

        if other.telemetry.sample_limit.is_some() {
            self.telemetry.sample_limit = other.telemetry.sample_limit;
        }
        if other.telemetry.log_file.is_some() {
            self.telemetry.log_file = other.telemetry.log_file;
        }

        if other.net.timeout_secs.is_some() {
            self.net.timeout_secs = other.net.timeout_secs;
        }
    }

    /// Backend base URL, or the local default.
    pub fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Runtime mode, development unless configured otherwise.
    pub fn mode(&self) -> RuntimeMode {
        self.runtime.mode.unwrap_or_default()
    }

    /// Maximum telemetry sample length, never above [`MAX_SAMPLE_LIMIT`].
    pub fn sample_limit(&self) -> usize {
        self.telemetry
            .sample_limit
            .map_or(MAX_SAMPLE_LIMIT, |limit| limit.min(MAX_SAMPLE_LIMIT))
    }

    /// Transport timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.net.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.ballot/config.toml)
/// 2. Global config (~/.ballot/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global ballot config directory (~/.ballot).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ballot"))
}

/// Get the global config path (~/.ballot/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.ballot/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".ballot").join("config.toml")
}
