//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match state.store.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "unreachable",
        Err(e) => {
            tracing::warn!(error = %e.detailed(), "Health check failed");
            "unreachable"
        }
    };

    Json(ApiResponse::ok(HealthResponse {
        status: if database == "connected" { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.store.backend_name().to_string(),
        database: database.to_string(),
    }))
}
