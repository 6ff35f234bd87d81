use axum::{
    http::{Method, Uri},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    docs,
    error::ApiError,
    middleware::logging,
    routes::{health, index, thoughts},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let thought_routes = Router::new()
        .route(
            "/thought",
            get(thoughts::list_thoughts).post(thoughts::create_thought),
        )
        .route(
            "/thought/:id",
            get(thoughts::get_thought)
                .patch(thoughts::update_thought)
                .delete(thoughts::delete_thought),
        )
        .route("/thought/:id/score", post(thoughts::score_thought))
        .route("/thought/:id/like", post(thoughts::score_thought));

    Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(thought_routes)
        .method_not_allowed_fallback(wrong_method)
        .fallback(no_route)
        .layer(middleware::from_fn(logging::log_request))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn no_route(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound(format!("{} {}", method, uri.path()))
}

async fn wrong_method(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors.allow_origin(Any)
        } else {
            let parsed_origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
                .collect();

            cors.allow_origin(parsed_origins)
        }
    } else {
        CorsLayer::permissive()
    }
}
