//! CLI definitions using clap.

use std::path::PathBuf;

use ballot::core::Gender;
use ballot::ops::Resource;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Ballot - a fault-tolerant client for the candidate information backend
#[derive(Parser)]
#[command(name = "ballot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Backend base URL (overrides config and BALLOT_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Run in production mode (no payload samples in telemetry)
    #[arg(long, global = true)]
    pub production: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append fallback events as JSON lines to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub telemetry_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List candidates
    Candidates(CandidatesArgs),

    /// Show a single candidate
    Candidate(CandidateArgs),

    /// List trending candidates
    Trending,

    /// List governorates
    Governorates,

    /// Show election statistics
    Stats,

    /// Fetch stats, trending candidates and governorates together
    Overview,

    /// Probe the live backend and fail if any check fails
    Smoke,

    /// Validate a saved response against an endpoint's schema
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CandidatesArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,

    /// Free-text search
    #[arg(long)]
    pub query: Option<String>,

    /// Only candidates standing in this governorate
    #[arg(long)]
    pub governorate: Option<String>,

    /// Only candidates of this gender (Male, Female)
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Backend sort key
    #[arg(long)]
    pub sort: Option<String>,
}

#[derive(Args)]
pub struct CandidateArgs {
    /// Candidate id
    pub id: String,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Endpoint the payload came from (candidates, candidate, trending, governorates, stats)
    #[arg(long, short)]
    pub endpoint: Resource,

    /// JSON file holding the response body
    pub file: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
