//! `ballot candidate` command

use anyhow::Result;

use super::{print_json, Session};
use crate::cli::CandidateArgs;

pub fn execute(session: &Session, args: CandidateArgs) -> Result<()> {
    let client = session.client()?;
    let candidate = client.fetch_candidate_by_id(&args.id);
    print_json(&candidate)
}
