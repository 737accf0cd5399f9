//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     resolved env + config → start() → signal subscriptions, label
//!
//! Shutdown (supervisor.rs):
//!     signal | fatal error | uncaught error → terminate
//!     first trigger  → teardown once → exit(0 or 1)
//!     second trigger → exit(1) immediately, no second teardown
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT by default → shutdown triggers
//! ```
//!
//! # Design Decisions
//! - One supervisor per process, single-use
//! - All trigger sources funnel into the same state machine
//! - Explicit disposal removes every subscription (no listener leaks
//!   across repeated start/stop cycles in embedding hosts or tests)

pub mod signals;
pub mod supervisor;

pub use signals::{ShutdownSignal, DEFAULT_SIGNALS};
pub use supervisor::{
    process_exit, start, BoxError, ErrorReporter, ExitFn, SupervisorConfig, SupervisorDeps,
    SupervisorHandle, TeardownFn,
};
