//! `dwell config` -- show the resolved configuration.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `dwell config` command. The API token is never printed.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    if ctx.json {
        output_json(&serde_json::json!({
            "config_file": ctx.config_file,
            "data_path": ctx.data_path,
            "config": ctx.config.redacted(),
        }));
        return Ok(());
    }

    if !ctx.quiet {
        match &ctx.config_file {
            Some(path) if path.is_file() => println!("# config file: {}", path.display()),
            Some(path) => println!("# config file: {} (not found)", path.display()),
            None => println!("# config file: none"),
        }
        println!("# dataset: {}", ctx.data_path.display());
    }
    print!("{}", ctx.config.to_yaml()?);
    Ok(())
}
