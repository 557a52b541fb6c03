//! `ballot trending` command

use anyhow::Result;

use super::{print_json, Session};

pub fn execute(session: &Session) -> Result<()> {
    let trending = session.client()?.fetch_trending();
    print_json(&trending)
}
