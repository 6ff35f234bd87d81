use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    response::{ok, EnvelopeResponse},
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IndexResponse {
    pub service: String,
    pub version: String,
    /// Request key for the thought text, as configured
    pub content_field: String,
    pub endpoints: Vec<EndpointInfo>,
}

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/", "Service liveness and endpoint listing"),
    ("GET", "/health", "Store reachability"),
    ("GET", "/thought", "List thoughts (sort, page, perPage)"),
    ("POST", "/thought", "Create a thought"),
    ("GET", "/thought/:id", "Get one thought"),
    ("PATCH", "/thought/:id", "Edit a thought's content"),
    ("POST", "/thought/:id/score", "Add one to a thought's resonance count"),
    ("POST", "/thought/:id/like", "Same as /thought/:id/score"),
    ("DELETE", "/thought/:id", "Delete a thought"),
    ("GET", "/api-docs/openapi.json", "OpenAPI document"),
];

/// Liveness check listing the available endpoints
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = IndexResponse)
    ),
    tag = "meta"
)]
pub async fn index(State(state): State<Arc<AppState>>) -> EnvelopeResponse<IndexResponse> {
    let endpoints = ENDPOINTS
        .iter()
        .map(|(method, path, description)| EndpointInfo {
            method: method.to_string(),
            path: path.to_string(),
            description: description.to_string(),
        })
        .collect();

    ok(IndexResponse {
        service: "thoughtboard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        content_field: state.thoughts.rules().content.field.clone(),
        endpoints,
    })
}
