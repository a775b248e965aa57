//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::{config::StorageBackend, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Configured catalog store
    pub backend: StorageBackend,
}

fn health(state: &AppState, status: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.config.database.backend,
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    health(&state, "healthy")
}

/// Readiness check endpoint (checks store connectivity)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.services.store.ping().await {
        Ok(()) => (StatusCode::OK, health(&state, "ready")),
        Err(e) => {
            tracing::warn!(
                "Readiness check failed for {:?} store: {}",
                state.config.database.backend,
                e
            );
            (StatusCode::SERVICE_UNAVAILABLE, health(&state, "unavailable"))
        }
    }
}
