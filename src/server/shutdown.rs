//! Graceful shutdown handling for the hello server
//!
//! The first SIGTERM logs [`TERMINATE_MESSAGE`] and trips the shutdown
//! channel, which closes the listener. Open connections are left to
//! finish on their own. A second SIGTERM ends the process immediately,
//! without a log line, the way the default disposition would.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// Line logged when the termination signal is handled
pub const TERMINATE_MESSAGE: &str = "echo from SIGTERM handler";

/// Exit status after a second SIGTERM, matching death by signal 15
pub const REPEATED_TERMINATE_EXIT_CODE: i32 = 128 + 15;

/// Receiving half of the shutdown channel
///
/// Cloned and handed to anything that has to stop on shutdown.
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Wait for shutdown signal
    pub async fn wait(&mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                // Sender dropped, treat as shutdown
                break;
            }
        }
    }

    /// Check if shutdown was signaled (non-blocking)
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Sending half of the shutdown channel
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    /// Trigger shutdown
    ///
    /// Returns `true` if this call tripped the channel, `false` if shutdown
    /// had already been triggered.
    pub fn shutdown(&self) -> bool {
        self.sender.send_if_modified(|closed| {
            if *closed {
                false
            } else {
                *closed = true;
                true
            }
        })
    }
}

/// Create a new shutdown signal pair
///
/// Returns (controller, signal) where:
/// - controller: Used to trigger shutdown
/// - signal: Cloned and passed to components that need to listen
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownController { sender }, ShutdownSignal { receiver })
}

/// Registered listener for the termination signal
///
/// Registration happens eagerly so a SIGTERM delivered before the handler
/// task is first polled is still caught instead of killing the process.
pub struct TerminateListener {
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
}

impl TerminateListener {
    /// Install the SIGTERM handler
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(unix)]
    pub fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let sigterm = signal(SignalKind::terminate())?;
        Ok(Self { sigterm })
    }

    /// Ctrl+C stands in for SIGTERM on non-unix targets
    #[cfg(not(unix))]
    pub fn register() -> std::io::Result<Self> {
        Ok(Self {})
    }

    /// Wait for the next termination signal
    #[cfg(unix)]
    pub async fn recv(&mut self) {
        // None means the signal driver went away, which only happens when
        // the runtime is shutting down.
        if self.sigterm.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to wait for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

/// Spawn the one-time termination handler
///
/// On the first signal the handler logs [`TERMINATE_MESSAGE`] and trips
/// `controller`. A later signal exits the process silently with
/// [`REPEATED_TERMINATE_EXIT_CODE`], as if no handler were installed.
pub fn spawn_terminate_handler(
    listener: TerminateListener,
    controller: ShutdownController,
) -> JoinHandle<()> {
    spawn_terminate_handler_with(listener, controller, || {
        std::process::exit(REPEATED_TERMINATE_EXIT_CODE)
    })
}

pub(crate) fn spawn_terminate_handler_with<F>(
    mut listener: TerminateListener,
    controller: ShutdownController,
    on_repeat: F,
) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        listener.recv().await;
        info!("{}", TERMINATE_MESSAGE);
        controller.shutdown();

        listener.recv().await;
        on_repeat();
    })
}
