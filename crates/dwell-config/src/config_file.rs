//! Discovery of the `.dwell.yaml` configuration file.
//!
//! The file is looked up by walking up from the working directory, so a
//! single config at a project root serves every subdirectory. The
//! `DWELL_CONFIG` environment variable takes priority over the search.

use std::path::{Path, PathBuf};

/// The name of the dwell configuration file.
pub const CONFIG_FILE_NAME: &str = ".dwell.yaml";

/// The name of the environment variable that can point at a config file.
pub const CONFIG_FILE_ENV: &str = "DWELL_CONFIG";

/// Walk up the directory tree from `start` looking for `.dwell.yaml`.
///
/// Returns the path to the file if found, or `None` if the filesystem root
/// is reached without finding one.
///
/// # Examples
///
/// ```no_run
/// use dwell_config::config_file::find_config_file;
/// use std::path::Path;
///
/// if let Some(file) = find_config_file(Path::new(".")) {
///     println!("Using config at {}", file.display());
/// }
/// ```
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break, // Reached filesystem root.
        }
    }

    None
}

/// Resolve the config file to use.
///
/// Priority: `DWELL_CONFIG` (used as-is, even if the file does not exist
/// yet) > the nearest `.dwell.yaml` above `start`.
pub fn discover_config_file(start: &Path) -> Option<PathBuf> {
    if let Some(env_path) = std::env::var_os(CONFIG_FILE_ENV) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    find_config_file(start)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
