//! Observability subsystem.
//!
//! # Responsibilities
//! - Logging bootstrap for embedding applications
//!
//! The core subsystems emit `tracing` events directly; this module only
//! hosts the optional subscriber setup.

pub mod logging;
