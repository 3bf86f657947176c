//! Clap CLI definitions for the `dwell` command.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// dwell -- who held each Jira issue while it sat in a status.
#[derive(Parser, Debug)]
#[command(
    name = "dwell",
    about = "Time-in-status attribution for Jira issues",
    long_about = "Fetches issues with their changelog from Jira and attributes the time each \
                  issue spent in a status to the people assigned to it.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Dataset file (default: `data_file` from config, else search.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Config file (default: $DWELL_CONFIG, else nearest .dwell.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch issues with their changelog from Jira and save them.
    Search(SearchArgs),

    /// Summarize the saved dataset.
    Info,

    /// Attribute time in a status to assignees.
    Report(ReportArgs),

    /// Show the status and assignee timelines of one issue.
    Timeline(TimelineArgs),

    /// Show the resolved configuration.
    Config,

    /// Generate shell completion scripts.
    Completion(CompletionArgs),
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Arguments for `dwell search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Start date (YYYY-MM-DD) of the update range.
    #[arg(short = 's', long = "start-date", value_parser = parse_date, conflicts_with = "issues")]
    pub start_date: Option<NaiveDate>,

    /// End date (YYYY-MM-DD) of the update range, inclusive.
    #[arg(short = 'e', long = "end-date", value_parser = parse_date, conflicts_with = "issues")]
    pub end_date: Option<NaiveDate>,

    /// Issue keys to fetch instead of a date range.
    #[arg(short = 'i', long = "issues", num_args = 1..)]
    pub issues: Vec<String>,

    /// Maximum number of issues to request.
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Value of the `fields` query parameter.
    #[arg(long)]
    pub fields: Option<String>,

    /// Value of the `expand` query parameter.
    #[arg(long)]
    pub expand: Option<String>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Which report sections to print.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    /// Per issue: every assignee with their time.
    Issue,
    /// Per lead: the issues they led with estimated hours.
    #[default]
    Assignee,
    /// Both sections.
    Both,
    /// No sections (useful with -v).
    None,
}

impl ReportKind {
    pub fn includes_issues(self) -> bool {
        matches!(self, Self::Issue | Self::Both)
    }

    pub fn includes_assignees(self) -> bool {
        matches!(self, Self::Assignee | Self::Both)
    }
}

/// Arguments for `dwell report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Status to measure: an alias from config (development, review) or a
    /// raw status id.
    #[arg(long, default_value = "development")]
    pub status: String,

    /// Report to print.
    #[arg(long, value_enum, default_value_t = ReportKind::Assignee)]
    pub report: ReportKind,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Arguments for `dwell timeline`.
#[derive(Args, Debug)]
pub struct TimelineArgs {
    /// Issue id or key.
    pub issue: String,

    /// Show the transitions active at this instant
    /// (e.g. 2023-01-02T14:30:00.000+0000).
    #[arg(long)]
    pub at: Option<String>,

    /// Treat a transition dated exactly at `--at` as already active.
    #[arg(long, requires = "at")]
    pub inclusive: bool,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `dwell completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Supported shells.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate bash completions.
    Bash,
    /// Generate zsh completions.
    Zsh,
    /// Generate fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
