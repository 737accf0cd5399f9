//! Layered environment resolution.
//!
//! # Data Flow
//! ```text
//! base env (application/config defaults)
//!     → node-context inference + validation
//!     → process env merged over base (unless ISOLATED_ENV)
//!     → env.node.<node> and env.deploy.<deploy> loaded concurrently
//!     → fixed-order reduction: working < node file < deploy file
//!     → AppEnvVars (immutable from here on)
//! ```
//!
//! # Design Decisions
//! - The reduction order is load-bearing: file contents shadow the earlier
//!   process-env merge, so a process variable survives only when no file
//!   defines the same key. This matches the long-standing behavior of the
//!   historical resolver and must not be "fixed" to a process-wins rule.
//! - A missing env file is an empty contribution, never an error
//! - Only an invalid node context aborts resolution

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::env::dotenv;
use crate::env::types::{AppEnvVars, NodeContext, ISOLATED_ENV_VAR, NODE_ENV_VAR};
use crate::env::EnvError;

/// Injected file-read capability for env files.
///
/// The resolver never touches the filesystem directly; tests substitute an
/// in-memory implementation.
pub trait EnvFileReader: Send + Sync {
    /// Read the raw bytes of the file at `path`.
    fn read(&self, path: &Path) -> impl std::future::Future<Output = io::Result<Vec<u8>>> + Send;
}

/// The default reader, backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEnvFiles;

impl EnvFileReader for FsEnvFiles {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// Resolve the final environment mapping from its layered sources.
///
/// Sources, lowest to highest precedence:
/// 1. `base_env` — defaults supplied by the embedding application
/// 2. `process_env` — merged over the base unless `ISOLATED_ENV` is set
/// 3. `env.node.<node_context>` under `project_dir`, if present
/// 4. `env.deploy.<deploy_context>` under `project_dir`, if present
///
/// The effective node context is the explicit `node_context` argument,
/// falling back to `base_env["NODE_ENV"]`, falling back to `development`
/// with a warning. It is validated against the closed enumeration and
/// written into the result under `NODE_ENV`.
///
/// # Errors
///
/// Fails with [`EnvError::InvalidNodeContext`] when the effective node
/// context is not a member of the enumeration. Missing or unreadable env
/// files never fail resolution.
pub async fn resolve_env<F: EnvFileReader>(
    node_context: Option<&str>,
    deploy_context: &str,
    base_env: &AppEnvVars,
    process_env: &AppEnvVars,
    project_dir: &Path,
    files: &F,
) -> Result<AppEnvVars, EnvError> {
    debug!("loading the environment service");

    let mut env = base_env.clone();

    // Inference happens before validation so a base-env hint gets the same
    // scrutiny as an explicit argument.
    let raw_context = match node_context {
        Some(explicit) => explicit.to_string(),
        None => match base_env.get(NODE_ENV_VAR) {
            Some(hint) => hint.clone(),
            None => {
                warn!(
                    assumed = NodeContext::Development.as_str(),
                    "no node context provided, assuming development"
                );
                NodeContext::Development.as_str().to_string()
            }
        },
    };
    let node: NodeContext = raw_context.parse()?;

    // Isolation gate: a set, non-empty ISOLATED_ENV excludes the whole
    // process env from the merge (no partial isolation). The flag itself is
    // carried through so consumers can observe that isolation was active.
    let isolated = process_env
        .get(ISOLATED_ENV_VAR)
        .is_some_and(|flag| !flag.is_empty());
    if isolated {
        warn!("using an isolated env");
        if let Some(flag) = process_env.get(ISOLATED_ENV_VAR) {
            env.insert(ISOLATED_ENV_VAR.to_string(), flag.clone());
        }
    } else {
        debug!("using the process env");
        for (key, value) in process_env {
            env.insert(key.clone(), value.clone());
        }
    }

    env.insert(NODE_ENV_VAR.to_string(), node.as_str().to_string());

    let node_file = format!("env.node.{node}");
    let deploy_file = format!("env.deploy.{deploy_context}");

    // Completion order of the two reads is irrelevant: contributions are
    // folded in the fixed precedence order below.
    let (node_vars, deploy_vars) = tokio::join!(
        read_env_file(files, project_dir, &node_file),
        read_env_file(files, project_dir, &deploy_file),
    );

    for contribution in [node_vars, deploy_vars] {
        for (key, value) in contribution {
            env.insert(key, value);
        }
    }

    info!(node_context = %node, "running with node environment");
    info!(deploy_context, "running with deployment environment");

    Ok(env)
}

/// Load and parse one optional env file.
///
/// Any read failure, absence included, yields an empty contribution.
async fn read_env_file<F: EnvFileReader>(
    files: &F,
    project_dir: &Path,
    file_name: &str,
) -> AppEnvVars {
    let path: PathBuf = project_dir.join(file_name);

    debug!(path = %path.display(), "trying to load env file");

    match files.read(&path).await {
        Ok(bytes) => {
            let vars = dotenv::parse(&String::from_utf8_lossy(&bytes));
            info!(path = %path.display(), count = vars.len(), "loaded env file");
            vars
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no env file found");
            AppEnvVars::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// In-memory reader keyed by full path.
    struct MapFiles(HashMap<PathBuf, Vec<u8>>);

    impl MapFiles {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(path, content)| (PathBuf::from(path), content.as_bytes().to_vec()))
                    .collect(),
            )
        }
    }

    impl EnvFileReader for MapFiles {
        async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn vars(entries: &[(&str, &str)]) -> AppEnvVars {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn infers_development_when_nothing_is_provided() {
        let env = resolve_env(
            None,
            "local",
            &AppEnvVars::new(),
            &AppEnvVars::new(),
            Path::new("/project"),
            &MapFiles::new(&[]),
        )
        .await
        .unwrap();

        assert_eq!(env["NODE_ENV"], "development");
    }

    #[tokio::test]
    async fn adopts_base_env_hint_before_defaulting() {
        let env = resolve_env(
            None,
            "local",
            &vars(&[("NODE_ENV", "production")]),
            &AppEnvVars::new(),
            Path::new("/project"),
            &MapFiles::new(&[]),
        )
        .await
        .unwrap();

        assert_eq!(env["NODE_ENV"], "production");
    }

    #[tokio::test]
    async fn validates_the_base_env_hint_too() {
        let err = resolve_env(
            None,
            "local",
            &vars(&[("NODE_ENV", "bogus")]),
            &AppEnvVars::new(),
            Path::new("/project"),
            &MapFiles::new(&[]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, EnvError::InvalidNodeContext { value } if value == "bogus"));
    }

    #[tokio::test]
    async fn explicit_context_wins_over_base_hint() {
        let env = resolve_env(
            Some("test"),
            "local",
            &vars(&[("NODE_ENV", "production")]),
            &AppEnvVars::new(),
            Path::new("/project"),
            &MapFiles::new(&[]),
        )
        .await
        .unwrap();

        assert_eq!(env["NODE_ENV"], "test");
    }

    #[tokio::test]
    async fn deploy_file_shadows_node_file_and_process() {
        let files = MapFiles::new(&[
            (
                "/project/env.node.development",
                "DEV_MODE=1\nDB_HOST = 'test1.localhost'\n",
            ),
            (
                "/project/env.deploy.local",
                "DB_PASSWORD=oudelali\nDB_HOST = 'test2.localhost'\n",
            ),
        ]);

        let env = resolve_env(
            Some("development"),
            "local",
            &AppEnvVars::new(),
            &vars(&[("DB_HOST", "proc.localhost")]),
            Path::new("/project"),
            &files,
        )
        .await
        .unwrap();

        assert_eq!(env["DB_HOST"], "test2.localhost");
        assert_eq!(env["DB_PASSWORD"], "oudelali");
        assert_eq!(env["DEV_MODE"], "1");
    }

    #[tokio::test]
    async fn process_value_survives_only_without_file_claims() {
        let files = MapFiles::new(&[("/project/env.node.development", "OTHER=1\n")]);

        let env = resolve_env(
            Some("development"),
            "local",
            &vars(&[("DB_HOST", "base.localhost")]),
            &vars(&[("DB_HOST", "proc.localhost")]),
            Path::new("/project"),
            &files,
        )
        .await
        .unwrap();

        assert_eq!(env["DB_HOST"], "proc.localhost");
        assert_eq!(env["OTHER"], "1");
    }
}
