//! Answer Signing Service Binary
//!
//! Runs the HTTP server that signs and verifies answer sets.

use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use signer_bridge::JwtExtractor;
use signer_service::{create_router, storage, ApiConfig, AppState, ServiceConfig, SignatureService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config errors surface through main's error return, before logging exists
    let config = ServiceConfig::from_env().context("Invalid configuration")?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let store = storage::open(&config.database_url)
        .await
        .context("Failed to open record store")?;

    let extractor = Arc::new(JwtExtractor::new(config.jwt_config()));
    let service = SignatureService::new(extractor, store);

    let state = Arc::new(AppState {
        service,
        config: ApiConfig {
            request_timeout: config.request_timeout,
        },
    });

    let app = create_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(
        addr = %addr,
        audience = ?config.jwt_audience,
        issuer = ?config.jwt_issuer,
        "Signing service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Signing service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received, draining connections");
}
