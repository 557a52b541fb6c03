//! Global context for Ballot operations.
//!
//! Provides centralized access to configuration, paths, and environment.
//! This is the only place the process environment is read; everything below
//! it receives a resolved [`Config`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config, RuntimeMode};

/// Overrides the configured backend URL.
pub const ENV_BASE_URL: &str = "BALLOT_API_BASE_URL";

/// Overrides the configured runtime mode (`development` or `production`).
pub const ENV_MODE: &str = "BALLOT_ENV";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global Ballot data (~/.ballot/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        // Fallback to ./.ballot when there is no home directory
        let home = config::global_config_dir().unwrap_or_else(|| PathBuf::from(".ballot"));

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Ballot home directory (~/.ballot/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.cwd)
    }

    /// Load global and project config, then apply environment overrides.
    pub fn load_config(&self) -> Config {
        let mut config = config::load_config(&self.config_path(), &self.project_config_path());
        apply_env(&mut config, |key| std::env::var(key).ok());
        config
    }
}

/// Apply `BALLOT_*` overrides using `lookup` to read variables.
///
/// Empty values are ignored. An unparseable mode is logged and ignored.
pub fn apply_env(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = lookup(ENV_BASE_URL) {
        tracing::debug!("Using backend from {}: {}", ENV_BASE_URL, url);
        config.api.base_url = Some(url);
    }

    if let Some(mode) = lookup(ENV_MODE) {
        match mode.parse::<RuntimeMode>() {
            Ok(mode) => config.runtime.mode = Some(mode),
            Err(e) => tracing::warn!("Ignoring {}: {}", ENV_MODE, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_context_paths() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(tmp.path().join("home"));

        assert_eq!(ctx.config_path(), tmp.path().join("home").join("config.toml"));
        assert_eq!(
            ctx.project_config_path(),
            tmp.path().join(".ballot").join("config.toml")
        );
    }

    #[test]
    fn test_load_config_layers_files() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::write(home.join("config.toml"), "[net]\ntimeout_secs = 2\n").unwrap();

        std::fs::create_dir_all(tmp.path().join(".ballot")).unwrap();
        std::fs::write(
            tmp.path().join(".ballot").join("config.toml"),
            "[runtime]\nmode = \"production\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(home);
        let mut config = config::load_config(&ctx.config_path(), &ctx.project_config_path());
        apply_env(&mut config, env(&[]));

        assert_eq!(config.net.timeout_secs, Some(2));
        assert_eq!(config.mode(), RuntimeMode::Production);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.api.base_url = Some("http://file:4001".into());

        apply_env(
            &mut config,
            env(&[(ENV_BASE_URL, "http://env:4001"), (ENV_MODE, "production")]),
        );

        assert_eq!(config.base_url(), "http://env:4001");
        assert_eq!(config.mode(), RuntimeMode::Production);
    }

    #[test]
    fn test_env_ignores_empty_and_invalid() {
        let mut config = Config::default();
        apply_env(&mut config, env(&[(ENV_BASE_URL, " "), (ENV_MODE, "staging")]));
        assert_eq!(config, Config::default());
    }
}
