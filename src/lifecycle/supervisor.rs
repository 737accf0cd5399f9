//! Process lifecycle supervision.
//!
//! # States
//! - Running: triggers accepted, no teardown started
//! - ShuttingDown: teardown in flight, a repeated trigger force-exits
//! - Exited: the injected exit function was called
//!
//! # State Transitions
//! ```text
//! Running → ShuttingDown: configured signal | fatal error | uncaught error
//! ShuttingDown → Exited: teardown settled (success or failure)
//! ShuttingDown → Exited: repeated trigger, exit(1) without a second teardown
//! ```
//!
//! # Design Decisions
//! - Every failure path ends in an exit call; the supervisor never returns
//!   a recoverable error to a caller
//! - Teardown is attempted at most once per process lifetime
//! - The exit function is injected so tests observe codes instead of dying
//! - The shutdown flag lives inside one task; no locking needed

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::env::{AppEnvVars, NODE_ENV_VAR};
use crate::lifecycle::signals::{spawn_signal_listeners, ShutdownSignal, DEFAULT_SIGNALS};

/// A transported failure, boxed for channel plumbing.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Injected process-exit capability.
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// Injected teardown capability, releasing everything the broader
/// application runtime owns. Invoked at most once.
pub type TeardownFn = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), BoxError>> + Send>;

/// The real exit capability, for production wiring.
pub fn process_exit() -> ExitFn {
    Arc::new(|code| std::process::exit(code))
}

/// Supervisor configuration.
pub struct SupervisorConfig {
    /// Display name for the process label; empty falls back to the
    /// current executable name.
    pub process_name: String,
    /// Signals to subscribe to.
    pub signals: Vec<ShutdownSignal>,
    /// The deploy-context tag, for the process label.
    pub deploy_context: String,
    /// The resolved environment; read for `NODE_ENV`, never mutated.
    pub env: AppEnvVars,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            process_name: String::new(),
            signals: DEFAULT_SIGNALS.to_vec(),
            deploy_context: crate::env::DEFAULT_DEPLOY_CONTEXT.to_string(),
            env: AppEnvVars::new(),
        }
    }
}

/// Capabilities the supervisor consumes.
pub struct SupervisorDeps {
    /// Terminates the process. Tests substitute a recording closure.
    pub exit: ExitFn,
    /// Single-fire fatal-error notification from the application runtime.
    pub fatal: oneshot::Receiver<BoxError>,
    /// Releases application resources during graceful shutdown.
    pub teardown: TeardownFn,
}

/// An internal shutdown trigger, whatever its source.
#[derive(Debug)]
pub(crate) enum Trigger {
    /// A configured OS signal was delivered.
    Signal(ShutdownSignal),
    /// The fatal-error source fired.
    Fatal(BoxError),
    /// An uncaught error was reported.
    Uncaught(BoxError),
}

impl Trigger {
    fn reason(&self) -> &'static str {
        match self {
            Trigger::Signal(sig) => sig.name(),
            Trigger::Fatal(_) => "FATAL",
            Trigger::Uncaught(_) => "ERR",
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            Trigger::Signal(_) => 0,
            Trigger::Fatal(_) | Trigger::Uncaught(_) => 1,
        }
    }
}

/// Cloneable entry point for uncaught-error reporting.
///
/// The embedding application wires this into whatever watches its tasks
/// (a panic hook, join-handle watchers). Each report drives the same
/// shutdown path as a terminating signal, with a non-zero exit code.
#[derive(Clone)]
pub struct ErrorReporter {
    triggers: mpsc::UnboundedSender<Trigger>,
}

impl ErrorReporter {
    /// Report an uncaught error; equivalent to receiving `"ERR"`.
    pub fn report_uncaught(&self, err: BoxError) {
        let _ = self.triggers.send(Trigger::Uncaught(err));
    }
}

/// Handle to a running supervisor.
///
/// Single-use for the life of the process: the supervisor exits the
/// process on any trigger, or is explicitly disposed.
pub struct SupervisorHandle {
    label: String,
    reporter: ErrorReporter,
    dispose_tx: Option<oneshot::Sender<()>>,
    listeners: Vec<JoinHandle<()>>,
    fatal_forwarder: JoinHandle<()>,
    main: JoinHandle<()>,
}

impl SupervisorHandle {
    /// The computed process label, `"<name> - <deploy>:<NODE_ENV>"`.
    pub fn process_label(&self) -> &str {
        &self.label
    }

    /// An entry point for uncaught-error reporting.
    pub fn error_reporter(&self) -> ErrorReporter {
        self.reporter.clone()
    }

    /// Remove every subscription and stop the supervisor.
    ///
    /// After disposal, no configured signal is handled anymore. Consumes
    /// the handle, so a second disposal cannot happen.
    pub async fn dispose(mut self) {
        for listener in self.listeners.drain(..) {
            listener.abort();
        }
        self.fatal_forwarder.abort();
        if let Some(dispose) = self.dispose_tx.take() {
            let _ = dispose.send(());
        }
        let _ = (&mut self.main).await;
        info!("process supervisor disposed");
    }
}

/// Start supervising the current process.
///
/// Subscribes to the configured signals, the fatal-error source and the
/// uncaught-error reporter, and runs the shutdown state machine until the
/// process exits or the handle is disposed.
pub fn start(config: SupervisorConfig, deps: SupervisorDeps) -> SupervisorHandle {
    let label = process_label(&config);
    info!(label = %label, "process supervisor started");

    let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();
    let (dispose_tx, dispose_rx) = oneshot::channel();

    let listeners = spawn_signal_listeners(&config.signals, trigger_tx.clone());

    let fatal_forwarder = {
        let triggers = trigger_tx.clone();
        let fatal = deps.fatal;
        tokio::spawn(async move {
            if let Ok(err) = fatal.await {
                let _ = triggers.send(Trigger::Fatal(err));
            }
        })
    };

    let main = tokio::spawn(run(trigger_rx, dispose_rx, deps.exit, deps.teardown));

    SupervisorHandle {
        label,
        reporter: ErrorReporter {
            triggers: trigger_tx,
        },
        dispose_tx: Some(dispose_tx),
        listeners,
        fatal_forwarder,
        main,
    }
}

/// The supervisor state machine.
async fn run(
    mut triggers: mpsc::UnboundedReceiver<Trigger>,
    mut dispose_rx: oneshot::Receiver<()>,
    exit: ExitFn,
    teardown: TeardownFn,
) {
    let mut shutting_down = false;
    let mut teardown = Some(teardown);
    let mut shutdown_task: Option<JoinHandle<()>> = None;
    let (done_tx, mut done_rx) = oneshot::channel::<()>();
    let mut done_tx = Some(done_tx);

    loop {
        tokio::select! {
            maybe_trigger = triggers.recv() => {
                let Some(trigger) = maybe_trigger else { break };

                match &trigger {
                    Trigger::Fatal(err) => error!(error = %err, "fatal error"),
                    Trigger::Uncaught(err) => error!(error = %err, "uncaught error"),
                    Trigger::Signal(_) => {}
                }

                if shutting_down {
                    warn!(reason = trigger.reason(), "trigger received again, exiting now");
                    exit(1);
                    break;
                }

                shutting_down = true;
                warn!(
                    reason = trigger.reason(),
                    "trigger received, repeat it to exit immediately"
                );

                if let (Some(teardown), Some(done)) = (teardown.take(), done_tx.take()) {
                    shutdown_task = Some(tokio::spawn(shutdown(
                        trigger.exit_code(),
                        teardown,
                        exit.clone(),
                        done,
                    )));
                }
            }
            _ = &mut done_rx => break,
            _ = &mut dispose_rx => break,
        }
    }

    if let Some(task) = shutdown_task {
        task.abort();
    }
}

/// Graceful shutdown: tear down once, then exit unconditionally.
async fn shutdown(code: i32, teardown: TeardownFn, exit: ExitFn, done: oneshot::Sender<()>) {
    warn!("shutting down now");

    match teardown().await {
        Ok(()) => info!("graceful shutdown done"),
        Err(err) => error!(error = %err, "could not shut down gracefully"),
    }

    exit(code);
    let _ = done.send(());
}

fn process_label(config: &SupervisorConfig) -> String {
    let name = if config.process_name.is_empty() {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "process".to_string())
    } else {
        config.process_name.clone()
    };
    let node_env = config.env.get(NODE_ENV_VAR).map(String::as_str).unwrap_or("");

    format!("{} - {}:{}", name, config.deploy_context, node_env)
}
