//! `dwell search` -- fetch issues with their changelog from Jira.

use anyhow::{Context, Result};
use dwell_core::dataset::save_dataset;
use dwell_jira::jql::{SearchScope, build_jql};
use dwell_jira::{JiraClient, SearchQuery};
use dwell_ui::styles::{render_accent, render_pass, render_warn};
use tracing::{info, warn};

use crate::cli::SearchArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `dwell search` command.
pub fn run(ctx: &RuntimeContext, args: &SearchArgs) -> Result<()> {
    let credentials = ctx.config.jira.credentials()?;
    let search = &ctx.config.search;

    let scope = SearchScope::from_inputs(
        &args.issues,
        args.start_date,
        args.end_date,
        &credentials.project,
        &search.excluded_statuses,
    )?;
    let query = SearchQuery {
        jql: build_jql(&scope),
        max_results: args.max_results.unwrap_or(search.max_results),
        fields: args.fields.clone().unwrap_or_else(|| search.fields.clone()),
        expand: args.expand.clone().unwrap_or_else(|| search.expand.clone()),
    };
    info!(jql = %query.jql, "built query");

    let client = JiraClient::new(&credentials.url, &credentials.email, &credentials.api_token);
    let body = client
        .search(&query)
        .with_context(|| format!("search against {} failed", credentials.url))?;

    let count = body["issues"].as_array().map_or(0, Vec::len);
    let is_last = body["isLast"].as_bool().unwrap_or(true);
    if !is_last {
        warn!(count, "more results available than were fetched; raise --max-results");
    }

    save_dataset(&ctx.data_path, &body)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "jql": query.jql,
            "issues": count,
            "is_last": is_last,
            "path": ctx.data_path,
        }));
    } else if !ctx.quiet {
        println!("JQL: {}", render_accent(&query.jql));
        println!(
            "{} {} issues to {}",
            render_pass("Saved"),
            count,
            ctx.data_path.display()
        );
        if !is_last {
            println!(
                "{}",
                render_warn("Not the last page: some matching issues were not fetched")
            );
        }
    }
    Ok(())
}
