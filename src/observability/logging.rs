//! Structured logging bootstrap.
//!
//! # Responsibilities
//! - Install a global tracing subscriber for the embedding application
//! - Pick the output format from the node context
//!
//! # Design Decisions
//! - JSON format for production, pretty format otherwise
//! - `RUST_LOG` overrides the fallback directives
//! - `try_init`: repeated calls (tests, embedding hosts) are harmless

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::env::NodeContext;

/// Install the global subscriber.
///
/// `default_directives` is used when `RUST_LOG` is absent, e.g.
/// `"appboot=debug,info"`. Returns whether this call installed the
/// subscriber (false when one was already set).
pub fn init(node_context: NodeContext, default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(filter);

    match node_context {
        NodeContext::Production => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .is_ok(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
            .is_ok(),
    }
}
