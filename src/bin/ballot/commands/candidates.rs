//! `ballot candidates` command

use anyhow::Result;
use ballot::core::CandidateQuery;
use ballot::util::shell::Status;

use super::{print_json, Session};
use crate::cli::CandidatesArgs;

pub fn execute(session: &Session, args: CandidatesArgs) -> Result<()> {
    let query = CandidateQuery {
        page: args.page,
        limit: args.limit,
        query: args.query,
        governorate: args.governorate,
        gender: args.gender,
        sort: args.sort,
    };

    let client = session.client()?;
    session
        .shell
        .status(Status::Fetching, format!("candidates from {}", session.config.base_url()));

    let page = client.fetch_candidates(&query);

    session.shell.note(format!(
        "page {} of {} ({} candidates in total)",
        page.page,
        page.pages().max(1),
        page.total
    ));

    print_json(&page)
}
