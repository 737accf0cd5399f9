//! Environment resolution subsystem.
//!
//! # Data Flow
//! ```text
//! application defaults (base env)
//! process env snapshot (capture_process_env)
//!     → resolver.rs (inference, validation, isolation gate)
//!     → dotenv.rs (env.node.* / env.deploy.* file contents)
//!     → AppEnvVars (resolved, immutable)
//!     → shared with the lifecycle supervisor and the application
//! ```
//!
//! # Design Decisions
//! - Every input is injected: no ambient `std::env` reads inside the core
//! - The node context is a closed enumeration; the deploy context is an
//!   opaque application-defined tag
//! - File sources are optional; only a bad node context is fatal

pub mod dotenv;
pub mod resolver;
pub mod types;

use thiserror::Error;

pub use resolver::{resolve_env, EnvFileReader, FsEnvFiles};
pub use types::{
    capture_process_env, extract_deploy_context, AppEnvVars, NodeContext,
    DEFAULT_DEPLOY_CONTEXT, ISOLATED_ENV_VAR, NODE_ENV_VAR,
};

/// Errors surfaced by environment resolution.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The effective node context is not a member of the closed set.
    #[error("invalid node context {value:?}, expected one of: test, development, production")]
    InvalidNodeContext {
        /// The offending tag.
        value: String,
    },

    /// The deploy context is not in the application's allowed list.
    #[error("unknown deploy context {value:?}, expected one of: {allowed:?}")]
    UnknownDeployContext {
        /// The offending tag.
        value: String,
        /// The application-defined allowed list.
        allowed: Vec<String>,
    },
}
