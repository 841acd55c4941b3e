//! Application builder and server runner.

use std::net::SocketAddr;

use axum::ServiceExt;
use axum::Router;
use axum::extract::Request;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tracing::info;

use docshelf_core::config::AppConfig;
use docshelf_core::error::AppError;
use docshelf_database::DatabasePool;
use docshelf_database::migration::run_migrations;

use crate::router::build_router;
use crate::state::AppState;

/// The servable application: the router behind trailing-slash
/// normalization, so `/api/docs/documents/` and `/api/docs/documents`
/// reach the same route.
pub type App = NormalizePath<Router>;

/// Builds the complete application from its state.
pub fn build_app(state: AppState) -> App {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

/// Connects, migrates, and serves until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting Docshelf server...");

    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    info!(provider = %config.cache.provider, "Initializing cache");
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::build(config, db.pool().clone()).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(address = %addr, "Docshelf server listening");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    info!("Docshelf server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
