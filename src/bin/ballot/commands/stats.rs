//! `ballot stats` command

use anyhow::Result;

use super::{print_json, Session};

pub fn execute(session: &Session) -> Result<()> {
    let stats = session.client()?.fetch_stats();
    print_json(&stats)
}
