//! OS signal subscription.
//!
//! # Responsibilities
//! - Name the signals the supervisor can subscribe to
//! - Translate each delivered signal into a supervisor trigger
//! - Keep listener tasks abortable for clean disposal
//!
//! # Design Decisions
//! - Uses Tokio's async-safe unix signal streams
//! - One listener task per configured signal, all feeding one channel;
//!   the supervisor loop decides what a trigger means
//! - Aborting a listener task stops handling without touching global state

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;

use crate::lifecycle::supervisor::Trigger;

/// Signals the supervisor knows how to subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShutdownSignal {
    /// SIGTERM, the conventional "please stop" signal.
    Term,
    /// SIGINT, interactive interrupt (Ctrl-C).
    Int,
    /// SIGQUIT.
    Quit,
    /// SIGHUP.
    Hup,
    /// SIGUSR1.
    Usr1,
    /// SIGUSR2.
    Usr2,
}

/// The default subscription set.
pub const DEFAULT_SIGNALS: [ShutdownSignal; 2] = [ShutdownSignal::Term, ShutdownSignal::Int];

impl ShutdownSignal {
    /// The conventional signal name, for logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ShutdownSignal::Term => "SIGTERM",
            ShutdownSignal::Int => "SIGINT",
            ShutdownSignal::Quit => "SIGQUIT",
            ShutdownSignal::Hup => "SIGHUP",
            ShutdownSignal::Usr1 => "SIGUSR1",
            ShutdownSignal::Usr2 => "SIGUSR2",
        }
    }

    fn kind(self) -> SignalKind {
        match self {
            ShutdownSignal::Term => SignalKind::terminate(),
            ShutdownSignal::Int => SignalKind::interrupt(),
            ShutdownSignal::Quit => SignalKind::quit(),
            ShutdownSignal::Hup => SignalKind::hangup(),
            ShutdownSignal::Usr1 => SignalKind::user_defined1(),
            ShutdownSignal::Usr2 => SignalKind::user_defined2(),
        }
    }
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Spawn one listener task per signal, each forwarding deliveries as
/// triggers.
///
/// The returned handles must be aborted on disposal so no handler fires
/// after the supervisor is gone.
pub(crate) fn spawn_signal_listeners(
    signals: &[ShutdownSignal],
    triggers: mpsc::UnboundedSender<Trigger>,
) -> Vec<JoinHandle<()>> {
    signals
        .iter()
        .map(|&sig| {
            let triggers = triggers.clone();
            tokio::spawn(async move {
                let mut stream = match signal(sig.kind()) {
                    Ok(stream) => stream,
                    Err(err) => {
                        error!(signal = %sig, error = %err, "could not subscribe to signal");
                        return;
                    }
                };
                while stream.recv().await.is_some() {
                    if triggers.send(Trigger::Signal(sig)).is_err() {
                        break;
                    }
                }
            })
        })
        .collect()
}
