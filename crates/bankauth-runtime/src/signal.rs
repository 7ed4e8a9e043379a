//! OS signal bridge.

use std::future::pending;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Waits for Ctrl+C or SIGTERM and returns the signal name.
///
/// A handler that cannot be installed never resolves; the other one still
/// works.
pub async fn wait_for_signal() -> &'static str {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<&'static str>();

    tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    }
}

/// Cancels `token` on the first shutdown signal.
///
/// Returns early without cancelling if the token is cancelled elsewhere.
pub async fn cancel_on_signal(token: CancellationToken) {
    tokio::select! {
        name = wait_for_signal() => {
            info!(signal = name, "Shutdown signal received, starting graceful shutdown");
            token.cancel();
        }
        _ = token.cancelled() => {}
    }
}
