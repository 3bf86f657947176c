//! `dwell` -- time-in-status attribution for Jira issues.
//!
//! Parses CLI arguments with clap, loads `.env` and the layered
//! configuration, resolves the runtime context and dispatches to command
//! handlers.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logging(cli.global.verbose);

    // A missing .env is normal; values may come from the real environment.
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let result = run(cli.command, &cli.global);

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(command: Option<Commands>, global: &cli::GlobalArgs) -> Result<()> {
    let Some(command) = command else {
        // No subcommand -- print help
        use clap::CommandFactory;
        Cli::command().print_help().ok();
        println!();
        return Ok(());
    };

    let ctx = RuntimeContext::from_global_args(global)?;

    match command {
        Commands::Search(args) => commands::search::run(&ctx, &args),
        Commands::Info => commands::info::run(&ctx),
        Commands::Report(args) => commands::report::run(&ctx, &args),
        Commands::Timeline(args) => commands::timeline::run(&ctx, &args),
        Commands::Config => commands::config_cmd::run(&ctx),
        Commands::Completion(args) => commands::completion::run(&ctx, &args),
    }
}

/// Logs go to stderr: `dwell=debug` with `-v`, otherwise `RUST_LOG` or
/// warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dwell=debug,dwell_core=debug,dwell_config=debug,dwell_jira=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
