use tokio::signal;
use tracing::warn;

/// Resolves when the process receives Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        signal(SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("🛑 Ctrl+C received, initiating shutdown..."),
        _ = terminate => warn!("🛑 SIGTERM received, initiating shutdown..."),
    }
}
