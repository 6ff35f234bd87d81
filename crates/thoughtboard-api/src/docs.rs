use axum::Json;
use utoipa::OpenApi;

use crate::response::ErrorDetail;
use crate::routes::{
    health::{self, HealthResponse},
    index::{self, EndpointInfo, IndexResponse},
    thoughts::{self, ListThoughtsResponse, ThoughtRequest, ThoughtResponse},
};

/// Every payload documented here is wrapped in `{ "response": ..., "success": ... }`.
#[derive(OpenApi)]
#[openapi(
    paths(
        index::index,
        health::health_check,
        thoughts::list_thoughts,
        thoughts::create_thought,
        thoughts::get_thought,
        thoughts::update_thought,
        thoughts::score_thought,
        thoughts::delete_thought,
    ),
    components(schemas(
        ThoughtResponse,
        ThoughtRequest,
        ListThoughtsResponse,
        ErrorDetail,
        HealthResponse,
        IndexResponse,
        EndpointInfo,
    )),
    tags(
        (name = "thoughts", description = "Create, list, score, edit and delete thoughts"),
        (name = "meta", description = "Liveness and health")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
