//! Health check handler.

use axum::Json;
use axum::extract::State;

use stockroom_database::IdentityStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.store.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "unavailable",
        Err(e) => {
            tracing::warn!(error = %e, "Identity store health check failed");
            "unavailable"
        }
    };

    Json(HealthResponse {
        status: if database == "connected" { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
