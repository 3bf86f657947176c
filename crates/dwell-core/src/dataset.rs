//! Reading and writing the saved search result (`search.json`).
//!
//! The file holds the raw search response exactly as Jira returned it, with
//! keys sorted and four-space indentation so that successive fetches diff
//! cleanly.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::jira::SearchResponse;

/// Error type for dataset persistence.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("{} not found (run 'dwell search' first)", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Loads a saved search result.
pub fn load_dataset(path: &Path) -> Result<SearchResponse> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            DatasetError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DatasetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let response: SearchResponse =
        serde_json::from_str(&content).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), issues = response.issues.len(), "loaded dataset");
    Ok(response)
}

/// Writes a raw search result to `path`, replacing any existing file.
pub fn save_dataset(path: &Path, value: &serde_json::Value) -> Result<()> {
    let io_err = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    buf.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = fs::File::create(path).map_err(io_err)?;
    file.write_all(&buf).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(())
}
