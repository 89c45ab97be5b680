use hello_shutdown::config::ServerConfig;
use hello_shutdown::server::{
    run, shutdown_channel, spawn_terminate_handler, ServerError, TerminateListener,
};
use tracing::{error, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "something bad happened");
            return Ok(());
        }
    };

    let (shutdown_controller, shutdown_signal) = shutdown_channel();

    // Install before binding so an early SIGTERM cannot kill the process
    let _held_controller = match TerminateListener::register() {
        Ok(listener) => {
            spawn_terminate_handler(listener, shutdown_controller);
            None
        }
        Err(e) => {
            // Keep serving with the default disposition. The controller has
            // to outlive run(), a dropped sender counts as shutdown.
            warn!(error = %e, "Failed to register SIGTERM handler");
            Some(shutdown_controller)
        }
    };

    // No retry on failure
    if let Err(e) = run(config, shutdown_signal).await {
        report_failure(&e);
    }

    Ok(())
}

/// Log a server failure unless `run()` already did
///
/// Returns whether a line was written.
fn report_failure(error: &ServerError) -> bool {
    match error {
        ServerError::Bind { .. } => false,
        other => {
            error!(error = %other, "Server failed");
            true
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
