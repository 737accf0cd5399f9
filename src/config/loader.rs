//! Configuration loading from disk.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for configuration loading.
///
/// Whatever went wrong underneath, the surfaced error names the attempted
/// path so startup diagnostics point somewhere actionable.
#[derive(Debug, Error)]
#[error("could not load configuration at {path:?}")]
pub struct NoConfigError {
    /// The configuration file that was attempted.
    pub path: PathBuf,
    /// The underlying read or parse failure.
    #[source]
    pub cause: ConfigLoadCause,
}

/// The underlying cause of a configuration load failure.
#[derive(Debug, Error)]
pub enum ConfigLoadCause {
    /// The file could not be read.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for the expected shape.
    #[error("parse failed: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load the configuration for a deploy context.
///
/// Reads `config/<deploy_context>/config.toml` under `project_src` and
/// deserializes it into the caller's configuration type, typically
/// [`crate::config::AppConfig`] or an application-defined shape.
///
/// # Errors
///
/// Unlike env files, a configuration file is not optional: any failure is
/// fatal and wrapped in [`NoConfigError`] with the attempted path.
pub fn load_app_config<T: DeserializeOwned>(
    project_src: &Path,
    deploy_context: &str,
) -> Result<T, NoConfigError> {
    let path = project_src
        .join("config")
        .join(deploy_context)
        .join("config.toml");

    debug!(path = %path.display(), "loading configuration");

    let config = std::fs::read_to_string(&path)
        .map_err(ConfigLoadCause::from)
        .and_then(|content| toml::from_str(&content).map_err(ConfigLoadCause::from))
        .map_err(|cause| {
            warn!(path = %path.display(), "could not load configuration file");
            NoConfigError {
                path: path.clone(),
                cause,
            }
        })?;

    info!(path = %path.display(), "configuration loaded");
    Ok(config)
}
