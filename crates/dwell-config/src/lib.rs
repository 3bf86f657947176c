//! Configuration management for the dwell system.
//!
//! This crate resolves the layered configuration (built-in defaults, the
//! `.dwell.yaml` file and `JIRA_*` environment variables), discovers the
//! config file in the filesystem and provides typed access to Jira
//! credentials, status aliases and search defaults.

pub mod config;
pub mod config_file;
