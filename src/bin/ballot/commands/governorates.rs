//! `ballot governorates` command

use anyhow::Result;

use super::{print_json, Session};

pub fn execute(session: &Session) -> Result<()> {
    let governorates = session.client()?.fetch_governorates();
    print_json(&governorates)
}
