//! Ballot CLI - a fault-tolerant client for the candidate information backend

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("ballot=debug")
    } else if cli.quiet {
        EnvFilter::new("ballot=error")
    } else {
        EnvFilter::new("ballot=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();

    let session = Session::from_cli(&cli)?;

    // Execute command
    match cli.command {
        Commands::Candidates(args) => commands::candidates::execute(&session, args),
        Commands::Candidate(args) => commands::candidate::execute(&session, args),
        Commands::Trending => commands::trending::execute(&session),
        Commands::Governorates => commands::governorates::execute(&session),
        Commands::Stats => commands::stats::execute(&session),
        Commands::Overview => commands::overview::execute(&session),
        Commands::Smoke => commands::smoke::execute(&session),
        Commands::Check(args) => commands::check::execute(&session, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
