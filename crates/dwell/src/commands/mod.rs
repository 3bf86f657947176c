//! Command handlers, one module per subcommand.

pub mod completion;
pub mod config_cmd;
pub mod info;
pub mod report;
pub mod search;
pub mod timeline;
