use std::future::pending;

use tokio::signal::ctrl_c;

use super::TRACING_TARGET_SHUTDOWN;

/// Resolves on the first SIGINT or SIGTERM.
///
/// A handler that cannot be installed never fires, the other one still does.
pub(crate) async fn shutdown_signal() {
    let signal = tokio::select! {
        () = interrupt() => "SIGINT",
        () = terminate() => "SIGTERM",
    };

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        signal,
        "Shutdown requested, no new connections are accepted"
    );
}

async fn interrupt() {
    if let Err(error) = ctrl_c().await {
        tracing::error!(target: TRACING_TARGET_SHUTDOWN, %error, "Cannot listen for SIGINT");
        pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(error) => {
            tracing::error!(target: TRACING_TARGET_SHUTDOWN, %error, "Cannot listen for SIGTERM");
            pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    pending::<()>().await;
}
