//! `ballot overview` command
//!
//! Fetches the three landing-page resources concurrently.

use std::time::Instant;

use anyhow::Result;
use ballot::util::shell::{format_duration, Status};

use super::{print_json, Session};

pub fn execute(session: &Session) -> Result<()> {
    let client = session.client()?;
    session
        .shell
        .status(Status::Fetching, format!("overview from {}", session.config.base_url()));

    let start = Instant::now();
    let overview = client.fetch_overview();

    session.shell.status(
        Status::Finished,
        format!(
            "{} trending, {} governorates in {}",
            overview.trending.len(),
            overview.governorates.len(),
            format_duration(start.elapsed())
        ),
    );

    print_json(&overview)
}
