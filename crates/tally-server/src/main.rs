//! tally server binary.
//!
//! - Config: `TALLY_CONFIG` or `tally.yaml`, defaults when absent
//! - Snapshot restored once before the listener opens
//! - Graceful shutdown on Ctrl-C / SIGTERM, readiness flips to draining

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::error::{Result, TallyError};
use tally_server::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load_from_env().inspect_err(|e| {
        tracing::error!(code = e.client_code().as_str(), error = %e, "config load failed");
    })?;
    let listen = format!("{}:{}", cfg.server.host, cfg.server.port);
    let snapshot_path = cfg.storage.snapshot_path.display().to_string();

    let state = AppState::new(cfg).await;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, snapshot = %snapshot_path, "tally-server starting");
    let listener = tokio::net::TcpListener::bind(state.cfg().server.bind_target())
        .await
        .map_err(|e| TallyError::Io(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| TallyError::Internal(format!("server failed: {e}")))?;

    tracing::info!("tally-server stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    state.set_draining();
    tracing::info!("signal received, starting graceful shutdown");
}
