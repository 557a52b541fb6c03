//! `ballot smoke` command
//!
//! Probes the live backend. Exits non-zero if any check fails.

use anyhow::{bail, Context, Result};
use ballot::ops::smoke;
use ballot::sources::HttpTransport;
use ballot::util::shell::{format_duration, Status};

use super::{print_json, Session};

pub fn execute(session: &Session) -> Result<()> {
    let transport =
        HttpTransport::from_config(&session.config).context("failed to set up backend client")?;
    let checks = smoke::default_checks();

    session
        .shell
        .status(Status::Checking, format!("{} ({} checks)", transport.base_url(), checks.len()));

    let progress = session.shell.progress(checks.len() as u64, "Checking");
    let report = smoke::run_checks(&transport, &checks, |result| {
        progress.tick(result.name);
        let elapsed = format_duration(result.elapsed);
        match &result.detail {
            None => progress.println(Status::Passed, format!("{} ({})", result.target, elapsed)),
            Some(detail) => progress.println(
                Status::Failed,
                format!("{} ({}): {}", result.target, elapsed, detail),
            ),
        }
    });
    progress.finish();

    print_json(&report)?;

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{} of {} smoke checks failed", failed, report.results.len());
    }

    session
        .shell
        .status(Status::Finished, format!("all {} checks passed", report.results.len()));
    Ok(())
}
