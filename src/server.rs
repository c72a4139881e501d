//! HTTP server initialization and runtime setup.
//!
//! Builds the store and service from [`Config`], then runs the Axum server
//! until Ctrl-C or SIGTERM.

use crate::application::services::MappingService;
use crate::config::Config;
use crate::infrastructure::store;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the mapping service described by `config`.
///
/// The store is owned by the returned service; nothing is kept in globals.
///
/// # Errors
///
/// Returns an error if the store cannot be reached or the code settings are invalid.
pub async fn build_service(config: &Config) -> Result<MappingService> {
    let store = store::connect(config)
        .await
        .context("Failed to initialise mapping store")?;
    let generator = config.code_generator()?;

    Ok(MappingService::new(
        store,
        generator,
        config.collision_policy,
        config.collision_max_attempts,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The store is unreachable at startup
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let service = build_service(&config).await?;
    let state = AppState::new(Arc::new(service), config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}
