//! Graceful shutdown
//!
//! One [`ShutdownCoordinator`] is shared by everything that can end the
//! process: the signal listener, the panic hook and supervised background
//! tasks. The first trigger cancels the token; [`ShutdownCoordinator::run`]
//! then drains the HTTP listener and closes the database, in that order.

use std::fmt;
use std::future::Future;
use std::io;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::db::{ConnectionManager, DatabaseDriver};

pub const EXIT_SUCCESS: u8 = 0;
/// Startup failed, the port was taken, or startup panicked
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    Running,
    Draining,
    ClosingDatabase,
    Exited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownTrigger {
    /// SIGINT or SIGTERM
    Signal(&'static str),
    /// A panic anywhere in the process
    UncaughtFault(String),
    /// A supervised background task failed or panicked
    UnhandledRejection(String),
}

impl ShutdownTrigger {
    pub fn label(&self) -> &'static str {
        match self {
            ShutdownTrigger::Signal(name) => name,
            ShutdownTrigger::UncaughtFault(_) => "Uncaught fault",
            ShutdownTrigger::UnhandledRejection(_) => "Unhandled rejection",
        }
    }
}

impl fmt::Display for ShutdownTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownTrigger::Signal(name) => write!(f, "{} received", name),
            ShutdownTrigger::UncaughtFault(message)
            | ShutdownTrigger::UnhandledRejection(message) => {
                write!(f, "{}: {}", self.label(), message)
            }
        }
    }
}

/// Outcome of a completed shutdown sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    pub trigger: Option<ShutdownTrigger>,
    pub exit_code: u8,
}

struct Inner {
    token: CancellationToken,
    trigger: OnceLock<ShutdownTrigger>,
    phase: watch::Sender<ShutdownPhase>,
}

#[derive(Clone)]
pub struct ShutdownCoordinator {
    inner: Arc<Inner>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (phase, _) = watch::channel(ShutdownPhase::Running);
        Self {
            inner: Arc::new(Inner {
                token: CancellationToken::new(),
                trigger: OnceLock::new(),
                phase,
            }),
        }
    }

    /// Start shutting down; returns false if a shutdown is already under way
    pub fn trigger(&self, trigger: ShutdownTrigger) -> bool {
        match self.inner.trigger.set(trigger) {
            Ok(()) => {
                match self.inner.trigger.get() {
                    Some(ShutdownTrigger::Signal(name)) => {
                        info!(signal = name, "{} received, starting graceful shutdown", name)
                    }
                    Some(fault) => error!(
                        trigger = %fault,
                        "{}, starting graceful shutdown",
                        fault.label()
                    ),
                    None => {}
                }
                self.inner.phase.send_replace(ShutdownPhase::Draining);
                self.inner.token.cancel();
                true
            }
            Err(ignored) => {
                warn!(
                    ignored = %ignored,
                    "Shutdown already in progress, ignoring trigger"
                );
                false
            }
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// The trigger that started the shutdown, if any
    pub fn cause(&self) -> Option<ShutdownTrigger> {
        self.inner.trigger.get().cloned()
    }

    pub fn phase(&self) -> ShutdownPhase {
        *self.inner.phase.borrow()
    }

    pub fn watch_phase(&self) -> watch::Receiver<ShutdownPhase> {
        self.inner.phase.subscribe()
    }

    pub fn token(&self) -> CancellationToken {
        self.inner.token.clone()
    }

    /// Resolves once shutdown has been triggered; feed to `with_graceful_shutdown`
    pub fn draining(&self) -> impl Future<Output = ()> + Send + 'static {
        let token = self.inner.token.clone();
        async move { token.cancelled().await }
    }

    /// Route panics into the shutdown sequence, after the default report
    pub fn install_panic_hook(&self) {
        let coordinator = self.clone();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            previous(info);
            let payload = info.payload();
            let message = payload
                .downcast_ref::<&str>()
                .map(|message| message.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_string());
            let message = match info.location() {
                Some(location) => format!("{} at {}", message, location),
                None => message,
            };
            coordinator.trigger(ShutdownTrigger::UncaughtFault(message));
        }));
    }

    /// Listen for SIGINT/SIGTERM for the lifetime of the process
    pub fn listen_for_signals(&self) -> JoinHandle<io::Result<()>> {
        tokio::spawn(listen_for_signals(self.clone()))
    }

    /// Trigger shutdown if `task` errors or panics
    pub fn supervise<T, E>(
        &self,
        name: &'static str,
        task: JoinHandle<Result<T, E>>,
    ) -> JoinHandle<()>
    where
        T: Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let coordinator = self.clone();
        tokio::spawn(async move {
            let message = match task.await {
                Ok(Ok(_)) => return,
                Ok(Err(err)) => format!("{} failed: {}", name, err),
                Err(join) if join.is_cancelled() => return,
                Err(join) => format!("{} panicked: {}", name, join),
            };
            coordinator.trigger(ShutdownTrigger::UnhandledRejection(message));
        })
    }

    /// Wait for a trigger, then drain the listener and close the database
    ///
    /// `drain` resolves when the HTTP server has stopped; if it resolves
    /// before any trigger the server died on its own and that counts as one.
    /// Neither step's failure stops the sequence.
    pub async fn run<F, E, D>(&self, drain: F, database: &ConnectionManager<D>) -> ShutdownReport
    where
        F: Future<Output = Result<(), E>>,
        E: fmt::Display,
        D: DatabaseDriver,
    {
        tokio::pin!(drain);

        let stopped_early = tokio::select! {
            biased;
            _ = self.inner.token.cancelled() => None,
            result = &mut drain => Some(result),
        };

        let drained = match stopped_early {
            Some(result) => {
                let message = match &result {
                    Ok(()) => "HTTP server stopped unexpectedly".to_string(),
                    Err(err) => format!("HTTP server failed: {}", err),
                };
                self.trigger(ShutdownTrigger::UnhandledRejection(message));
                result
            }
            None => {
                info!("Closing HTTP server, waiting for in-flight requests");
                drain.await
            }
        };

        match drained {
            Ok(()) => info!("HTTP server closed"),
            Err(err) => error!(error = %err, "Error closing HTTP server"),
        }

        self.inner.phase.send_replace(ShutdownPhase::ClosingDatabase);
        if let Err(err) = database.disconnect().await {
            error!(error = %err, "Error closing database connection during shutdown");
        }

        self.inner.phase.send_replace(ShutdownPhase::Exited);
        info!("Graceful shutdown complete");

        ShutdownReport {
            trigger: self.cause(),
            exit_code: EXIT_SUCCESS,
        }
    }
}

/// Run `startup` on its own task so a panic ends in [`EXIT_FAILURE`]
///
/// Covers the window before [`ShutdownCoordinator::install_panic_hook`];
/// the default hook has already reported the panic by the time this returns.
pub async fn guard_startup<F>(startup: F) -> u8
where
    F: Future<Output = u8> + Send + 'static,
{
    match tokio::spawn(startup).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "Unhandled fault during startup");
            EXIT_FAILURE
        }
    }
}

async fn listen_for_signals(coordinator: ShutdownCoordinator) -> io::Result<()> {
    #[cfg(unix)]
    let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    loop {
        #[cfg(unix)]
        let name = tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                "SIGINT"
            }
            Some(()) = terminate.recv() => "SIGTERM",
        };

        #[cfg(not(unix))]
        let name = {
            tokio::signal::ctrl_c().await?;
            "SIGINT"
        };

        coordinator.trigger(ShutdownTrigger::Signal(name));
    }
}
