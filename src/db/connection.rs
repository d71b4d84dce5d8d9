//! Database connection lifecycle
//!
//! A single [`ConnectionManager`] owns the process-wide database handle. It is
//! created once at startup and shared by reference with the collaborators
//! that observe it: the readiness probe and the shutdown coordinator.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Backend-specific connect/disconnect primitives
///
/// The manager never inspects driver errors; a failed `connect` surfaces the
/// driver's own error type unchanged.
#[async_trait]
pub trait DatabaseDriver: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn connect(&self, uri: &str) -> Result<Self::Handle, Self::Error>;

    async fn disconnect(&self, handle: Self::Handle) -> Result<(), Self::Error>;
}

/// Read-only view of connectivity, for health probes
pub trait ConnectionProbe: Send + Sync {
    fn is_connected(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connected,
    Error { message: String },
    Disconnected,
}

/// Bounded exponential backoff for the initial connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total connect attempts; zero is treated as one
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay slept after failed attempt `attempt` (1-indexed)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial_delay.saturating_mul(1u32 << exponent)
    }

    fn backoff(&self) -> ExponentialBuilder {
        let retries = self.attempts() - 1;
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(self.delay_after(retries.max(1)))
            .with_factor(2.0)
            .with_max_times(retries as usize)
    }
}

const EVENT_CAPACITY: usize = 32;

pub struct ConnectionManager<D: DatabaseDriver> {
    driver: D,
    policy: RetryPolicy,
    handle: Mutex<Option<D::Handle>>,
    state: watch::Sender<ConnectionState>,
    events: broadcast::Sender<ConnectionEvent>,
}

impl<D: DatabaseDriver> ConnectionManager<D> {
    pub fn new(driver: D) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            driver,
            policy: RetryPolicy::default(),
            handle: Mutex::new(None),
            state,
            events,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Connect, retrying with exponential backoff
    ///
    /// On exhaustion the error from the final attempt is returned unchanged.
    pub async fn connect(&self, uri: &str) -> Result<(), D::Error> {
        let mut handle = self.handle.lock().await;
        if handle.is_some() {
            debug!("Database already connected, skipping connect");
            return Ok(());
        }

        self.state.send_replace(ConnectionState::Connecting);

        let max_attempts = self.policy.attempts();
        let attempts = AtomicU32::new(0);
        let driver = &self.driver;
        let counter = &attempts;

        let result = (|| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            driver.connect(uri).await
        })
        .retry(self.policy.backoff())
        .sleep(tokio::time::sleep)
        .notify(|err: &D::Error, delay: Duration| {
            let attempt = attempts.load(Ordering::SeqCst);
            warn!(
                attempt,
                max_attempts,
                error = %err,
                "Database connection attempt {} failed",
                attempt
            );
            self.publish(ConnectionEvent::Error {
                message: err.to_string(),
            });
            info!(
                delay_ms = delay.as_millis() as u64,
                "Retrying in {} seconds...",
                delay.as_secs_f64()
            );
        })
        .await;

        let attempt = attempts.load(Ordering::SeqCst);
        match result {
            Ok(connected) => {
                *handle = Some(connected);
                self.state.send_replace(ConnectionState::Connected);
                self.publish(ConnectionEvent::Connected);
                info!(attempt, "Database connected successfully");
                Ok(())
            }
            Err(err) => {
                error!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "Database connection attempt {} failed",
                    attempt
                );
                error!("Max retries reached. Could not connect to the database.");
                self.state.send_replace(ConnectionState::Disconnected);
                self.publish(ConnectionEvent::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Close the connection; a no-op when already disconnected
    pub async fn disconnect(&self) -> Result<(), D::Error> {
        let mut handle = self.handle.lock().await;
        let Some(connected) = handle.take() else {
            debug!("Database already disconnected");
            self.state.send_replace(ConnectionState::Disconnected);
            return Ok(());
        };

        self.state.send_replace(ConnectionState::Disconnecting);
        let result = self.driver.disconnect(connected).await;
        self.state.send_replace(ConnectionState::Disconnected);

        match result {
            Ok(()) => {
                self.publish(ConnectionEvent::Disconnected);
                info!("Database disconnected successfully");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Error disconnecting from the database");
                self.publish(ConnectionEvent::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// A clone of the live driver handle, if connected
    pub async fn handle(&self) -> Option<D::Handle> {
        self.handle.lock().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConnectionEvent> {
        self.events.subscribe()
    }

    /// Log every lifecycle event for the lifetime of the manager
    pub fn spawn_event_logger(&self) -> JoinHandle<()> {
        let mut events = self.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(ConnectionEvent::Connected) => info!("Database connection established"),
                    Ok(ConnectionEvent::Error { message }) => {
                        error!(error = %message, "Database connection error")
                    }
                    Ok(ConnectionEvent::Disconnected) => info!("Database connection closed"),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Connection event logger fell behind")
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    fn publish(&self, event: ConnectionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl<D: DatabaseDriver> ConnectionProbe for ConnectionManager<D> {
    fn is_connected(&self) -> bool {
        ConnectionManager::is_connected(self)
    }
}

/// Mask credentials in a connection string before logging it
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("//") else {
        return uri.to_string();
    };
    let authority_start = scheme_end + 2;
    match uri[authority_start..].rfind('@') {
        Some(offset) => format!(
            "{}//***@{}",
            &uri[..scheme_end],
            &uri[authority_start + offset + 1..]
        ),
        None => uri.to_string(),
    }
}
