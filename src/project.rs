//! Project root discovery.
//!
//! # Responsibilities
//! - Walk upward from a starting directory to the nearest project root
//! - Fail clearly when no project marker exists
//!
//! # Design Decisions
//! - `Cargo.toml` is the project marker
//! - The starting directory is a parameter, never the ambient working
//!   directory, so callers and tests stay in control

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Error type for project discovery.
#[derive(Debug, Error)]
#[error("no project root found upward from {start:?}")]
pub struct NoProjectRootError {
    /// The directory the walk started from.
    pub start: PathBuf,
}

/// Locate the nearest project root at or above `start`.
///
/// # Errors
///
/// Fails with [`NoProjectRootError`] when no ancestor of `start` contains
/// a `Cargo.toml`.
pub fn locate_project_root(start: &Path) -> Result<PathBuf, NoProjectRootError> {
    for dir in start.ancestors() {
        if dir.join("Cargo.toml").is_file() {
            debug!(path = %dir.display(), "found the project dir");
            return Ok(dir.to_path_buf());
        }
    }

    Err(NoProjectRootError {
        start: start.to_path_buf(),
    })
}
