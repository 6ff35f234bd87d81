use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    config::StorageBackend,
    response::{Envelope, EnvelopeResponse},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Returns the health status of the API and its store
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    ),
    tag = "meta"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> EnvelopeResponse<HealthResponse> {
    let store = match state.config.storage.backend {
        StorageBackend::Mongodb => "mongodb",
        StorageBackend::Memory => "memory",
    };

    let (healthy, store_status) = match state.thoughts.ping().await {
        Ok(()) => (true, "connected"),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (false, "disconnected")
        }
    };

    let mut services = HashMap::new();
    services.insert(store.to_string(), store_status.to_string());

    let body = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    };

    if healthy {
        (StatusCode::OK, Json(Envelope::success(body)))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(Envelope::failure(body)))
    }
}
