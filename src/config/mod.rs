//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config/<deploy_context>/config.toml
//!     → loader.rs (read & deserialize)
//!     → AppConfig (base_env + open extension map)
//!     → base_env feeds the environment resolver as its lowest layer
//! ```
//!
//! # Design Decisions
//! - The file is selected by deploy context, mirroring the env.deploy.*
//!   naming of the resolver
//! - Loading is generic over the target shape so applications can bring
//!   their own configuration type
//! - A missing or malformed file is fatal, unlike optional env files

pub mod loader;
pub mod schema;

pub use loader::{load_app_config, ConfigLoadCause, NoConfigError};
pub use schema::AppConfig;
