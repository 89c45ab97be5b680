//! HTTP server for the hello world fixture
//!
//! Binds the configured port, answers every request with `hello world`,
//! and closes the listener on SIGTERM. See [`shutdown`] for the signal side.

mod hello;
pub mod shutdown;

pub use hello::{build_router, HELLO_BODY};
pub use shutdown::{
    shutdown_channel, spawn_terminate_handler, ShutdownController, ShutdownSignal,
    TerminateListener, REPEATED_TERMINATE_EXIT_CODE, TERMINATE_MESSAGE,
};

use crate::config::ServerConfig;
use std::future::Future;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind the listener on all interfaces
pub async fn bind(config: ServerConfig) -> Result<TcpListener, ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            port: config.port,
            source,
        })
}

/// Serve on `listener` until `shutdown` resolves
///
/// Once `shutdown` resolves the listener is dropped, so new connections
/// are refused. Connections already accepted are served to completion.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let port = listener.local_addr()?.port();
    // Log after successful bind - server is actually listening
    info!(port = %port, "hello world server is listening on {}", port);

    axum::serve(listener, build_router())
        .with_graceful_shutdown(shutdown)
        .await?;

    debug!(port = %port, "Listener closed and connections drained");
    Ok(())
}

/// Bind and serve until `shutdown` is triggered
///
/// A bind failure is logged once and returned; there is no retry.
pub async fn run(config: ServerConfig, mut shutdown: ShutdownSignal) -> Result<(), ServerError> {
    let listener = match bind(config).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "something bad happened");
            return Err(e);
        }
    };

    serve(listener, async move { shutdown.wait().await }).await
}

#[cfg(test)]
#[path = "hello_test.rs"]
mod hello_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
