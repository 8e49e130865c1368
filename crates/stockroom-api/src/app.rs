//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;

use stockroom_core::config::AppConfig;
use stockroom_core::error::AppError;
use stockroom_database::{DatabasePool, IdentityStore, UserRepository};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the Stockroom server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Stockroom server...");

    if config.auth.uses_placeholder_secret() {
        tracing::warn!(
            "auth.jwt_secret is the shipped placeholder; set STOCKROOM__AUTH__JWT_SECRET before deploying"
        );
    }

    let db = DatabasePool::connect(&config.database).await?;
    db.migrate().await?;

    let store: Arc<dyn IdentityStore> = Arc::new(UserRepository::new(db.pool().clone()));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, store)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "Stockroom server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    db.close().await;
    tracing::info!("Stockroom server stopped");
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C; shutting down");
    }
}
