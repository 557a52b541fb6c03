//! `ballot check` command
//!
//! Validates a saved response offline and renders any schema issues.

use anyhow::{bail, Result};
use ballot::ops::check::{check_payload, load_payload};
use ballot::util::shell::Status;
use miette::{GraphicalReportHandler, GraphicalTheme};

use super::{print_json, Session};
use crate::cli::CheckArgs;

pub fn execute(session: &Session, args: CheckArgs) -> Result<()> {
    let raw = load_payload(&args.file)?;

    session.shell.status(
        Status::Checking,
        format!("{} as a {} response", args.file.display(), args.endpoint),
    );

    match check_payload(args.endpoint, raw) {
        Ok(checked) => {
            session
                .shell
                .status(Status::Passed, format!("matches the {} schema", args.endpoint));
            print_json(&checked)
        }
        Err(violation) => {
            let theme = if session.shell.use_color() {
                GraphicalTheme::unicode()
            } else {
                GraphicalTheme::unicode_nocolor()
            };
            let mut rendered = String::new();
            GraphicalReportHandler::new_themed(theme)
                .with_width(120)
                .render_report(&mut rendered, &violation)?;
            eprint!("{}", rendered);

            bail!(
                "{} does not match the {} schema",
                args.file.display(),
                args.endpoint
            )
        }
    }
}
