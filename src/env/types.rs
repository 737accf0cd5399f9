//! Core environment types.
//!
//! # Responsibilities
//! - Define the resolved environment mapping (`AppEnvVars`)
//! - Define the closed node-context enumeration
//! - Validate application-supplied deploy-context tags
//! - Snapshot the ambient process environment into an injectable value

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::env::EnvError;

/// A flat, case-sensitive mapping from variable name to value.
///
/// Computed once per process start by the resolver and treated as
/// immutable by every consumer afterwards.
pub type AppEnvVars = HashMap<String, String>;

/// Reserved key holding the node-context tag.
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// Reserved key gating the process-env merge during resolution.
///
/// Only meaningful while resolving; consumers must not rely on it
/// afterwards.
pub const ISOLATED_ENV_VAR: &str = "ISOLATED_ENV";

/// The default deploy-context tag when the application supplies none.
pub const DEFAULT_DEPLOY_CONTEXT: &str = "local";

/// The closed execution-context enumeration.
///
/// Describes the runtime mode of the process, independent of the
/// deployment target. The set is fixed: widening it silently would let
/// tooling-facing values drift, so unknown tags are a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeContext {
    /// Test runs (unit/integration suites).
    Test,
    /// Local development.
    Development,
    /// Production deployments.
    Production,
}

impl NodeContext {
    /// Every allowed member, in diagnostic order.
    pub const ALL: [NodeContext; 3] = [
        NodeContext::Test,
        NodeContext::Development,
        NodeContext::Production,
    ];

    /// The canonical string tag for this context.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeContext::Test => "test",
            NodeContext::Development => "development",
            NodeContext::Production => "production",
        }
    }
}

impl fmt::Display for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeContext {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeContext::ALL
            .into_iter()
            .find(|ctx| ctx.as_str() == s)
            .ok_or_else(|| EnvError::InvalidNodeContext {
                value: s.to_string(),
            })
    }
}

/// Validate an application-supplied deploy-context tag.
///
/// The crate treats deploy contexts as opaque; the embedding application
/// defines its own allowed list and passes it here. A missing candidate
/// falls back to [`DEFAULT_DEPLOY_CONTEXT`].
pub fn extract_deploy_context(
    candidate: Option<&str>,
    allowed: &[&str],
) -> Result<String, EnvError> {
    let candidate = candidate.unwrap_or(DEFAULT_DEPLOY_CONTEXT);

    if allowed.contains(&candidate) {
        Ok(candidate.to_string())
    } else {
        Err(EnvError::UnknownDeployContext {
            value: candidate.to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Snapshot the ambient process environment into an owned mapping.
///
/// The resolver and supervisor never read `std::env` themselves; callers
/// capture the environment once at startup and inject the value, so tests
/// can exercise multiple instances without interference.
pub fn capture_process_env() -> AppEnvVars {
    std::env::vars().collect()
}
