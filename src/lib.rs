//! Application bootstrap primitives for long-running processes.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                          APPBOOT                              │
//!   │                                                               │
//!   │  base defaults ──┐                                            │
//!   │  process env ────┤   ┌──────────────┐      ┌───────────────┐  │
//!   │  env.node.*   ───┼──▶│ env resolver │─────▶│  AppEnvVars   │  │
//!   │  env.deploy.* ───┘   └──────────────┘      │  (immutable)  │  │
//!   │                                            └───────┬───────┘  │
//!   │                                                    │          │
//!   │  OS signals ──────┐                                ▼          │
//!   │  fatal errors ────┤   ┌──────────────────────────────────┐    │
//!   │  uncaught errors ─┼──▶│   process lifecycle supervisor   │    │
//!   │                   │   │  teardown once → exit, or forced │    │
//!   │                   └──▶│  exit on a repeated trigger      │    │
//!   │                       └──────────────────────────────────┘    │
//!   │                                                               │
//!   │  ┌──────────────────────────────────────────────────────────┐ │
//!   │  │                  Collaborator modules                    │ │
//!   │  │  ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌───────────────┐  │ │
//!   │  │  │ config  │ │ project  │ │  clock  │ │ observability │  │ │
//!   │  │  │ loader  │ │   root   │ │  mock   │ │    logging    │  │ │
//!   │  │  └─────────┘ └──────────┘ └─────────┘ └───────────────┘  │ │
//!   │  └──────────────────────────────────────────────────────────┘ │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two subsystems carry the real invariants:
//!
//! - [`env`]: deterministic merge of base defaults, the (isolation-gated)
//!   process environment and per-context env files into one immutable
//!   mapping.
//! - [`lifecycle`]: signal subscription, idempotent graceful shutdown,
//!   forced-exit escalation, and clean teardown of its own listeners.
//!
//! Everything else — config loading, project-root discovery, the clock
//! mock, logging setup — is plumbing the resolver and supervisor consume
//! as injected capabilities.

// Core subsystems
pub mod env;
pub mod lifecycle;

// Collaborators
pub mod clock;
pub mod config;
pub mod observability;
pub mod project;

pub use clock::{system_time, ClockMock, TimeFn};
pub use config::{load_app_config, AppConfig, NoConfigError};
pub use env::{
    capture_process_env, extract_deploy_context, resolve_env, AppEnvVars, EnvError,
    EnvFileReader, FsEnvFiles, NodeContext,
};
pub use lifecycle::{
    process_exit, start, ErrorReporter, ShutdownSignal, SupervisorConfig, SupervisorDeps,
    SupervisorHandle,
};
pub use project::{locate_project_root, NoProjectRootError};
