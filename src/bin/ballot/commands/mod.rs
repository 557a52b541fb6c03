//! Command implementations

pub mod candidate;
pub mod candidates;
pub mod check;
pub mod completions;
pub mod governorates;
pub mod overview;
pub mod smoke;
pub mod stats;
pub mod trending;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use ballot::util::config::{Config, RuntimeMode};
use ballot::util::shell::Shell;
use ballot::{ApiClient, GlobalContext};
use serde::Serialize;

use crate::cli::Cli;

/// Resolved configuration and output for one invocation.
pub struct Session {
    pub config: Config,
    pub shell: Arc<Shell>,
}

impl Session {
    /// Layer config files, environment and command-line flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let ctx = GlobalContext::new()?;
        let mut config = ctx.load_config();
        config.merge(flag_overrides(cli));

        tracing::debug!(
            "Backend {} in {} mode",
            config.base_url(),
            config.mode()
        );

        Ok(Session {
            config,
            shell: Arc::new(Shell::from_flags(cli.quiet, cli.verbose, cli.no_color)),
        })
    }

    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::from_config(&self.config).context("failed to set up backend client")
    }
}

fn flag_overrides(cli: &Cli) -> Config {
    let mut config = Config::default();
    config.api.base_url = cli.api_url.clone();
    config.runtime.mode = cli.production.then_some(RuntimeMode::Production);
    config.net.timeout_secs = cli.timeout;
    config.telemetry.log_file = cli.telemetry_log.clone();
    config
}

/// Write `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}
