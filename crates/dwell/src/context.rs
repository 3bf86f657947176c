//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds all the state a command handler needs:
//! the resolved configuration, the dataset path and the global flags.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dwell_config::config::{DwellConfig, load_config};
use dwell_config::config_file::discover_config_file;
use dwell_core::dataset::load_dataset;
use dwell_core::jira::SearchResponse;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Resolved configuration.
    pub config: DwellConfig,

    /// The config file that was consulted, if any.
    pub config_file: Option<PathBuf>,

    /// Dataset written by `dwell search` and read by everything else.
    pub data_path: PathBuf,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Config file priority: `--config` > `DWELL_CONFIG` > nearest
    /// `.dwell.yaml` above the working directory. Dataset priority:
    /// `--data` > `data_file` from config.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let config_file = match &global.config {
            Some(path) => Some(path.clone()),
            None => {
                let cwd = env::current_dir().context("cannot determine working directory")?;
                discover_config_file(&cwd)
            }
        };

        let config = load_config(config_file.as_deref()).context("invalid configuration")?;
        let data_path = global
            .data
            .clone()
            .unwrap_or_else(|| config.data_file.clone());

        debug!(
            config_file = ?config_file,
            data_path = %data_path.display(),
            "runtime context ready"
        );

        Ok(Self {
            config,
            config_file,
            data_path,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// Loads the dataset at [`Self::data_path`].
    pub fn load_dataset(&self) -> Result<SearchResponse> {
        Ok(load_dataset(&self.data_path)?)
    }
}
