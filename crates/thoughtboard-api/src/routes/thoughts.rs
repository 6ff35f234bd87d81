use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use thoughtboard_types::Thought;

use crate::{
    error::{ApiError, ApiResult},
    response::{created, ok, EnvelopeResponse},
    state::AppState,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtResponse {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    pub resonance_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Body accepted by create and update.
///
/// Field names follow the `[thoughts]` configuration; these are the defaults.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtRequest {
    pub content: String,
    #[serde(default)]
    pub secondary_text: Option<String>,
}

/// Raw listing parameters. Kept as strings so bad values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListThoughtsQuery {
    /// `asc` or `desc` (default `desc`, newest first)
    pub sort: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 20, capped at the configured maximum)
    #[serde(rename = "perPage", alias = "per_page")]
    pub per_page: Option<String>,
}

impl ListThoughtsQuery {
    /// First occurrence of each key wins; unknown keys are ignored.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sort" => &mut query.sort,
                "page" => &mut query.page,
                "perPage" | "per_page" => &mut query.per_page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListThoughtsResponse {
    pub thoughts: Vec<ThoughtResponse>,
    pub page: u64,
    pub per_page: u64,
    pub sort: String,
}

/// List thoughts, one page at a time
#[utoipa::path(
    get,
    path = "/thought",
    params(ListThoughtsQuery),
    responses(
        (status = 200, description = "One page of thoughts", body = ListThoughtsResponse)
    ),
    tag = "thoughts"
)]
pub async fn list_thoughts(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<EnvelopeResponse<ListThoughtsResponse>> {
    let query = match query {
        Ok(Query(pairs)) => ListThoughtsQuery::from_pairs(pairs),
        Err(e) => {
            tracing::debug!("Unreadable listing query, using defaults: {}", e.body_text());
            ListThoughtsQuery::default()
        }
    };

    let (plan, thoughts) = state
        .thoughts
        .list(
            query.sort.as_deref(),
            query.page.as_deref(),
            query.per_page.as_deref(),
        )
        .await?;

    Ok(ok(ListThoughtsResponse {
        thoughts: thoughts.into_iter().map(thought_to_response).collect(),
        page: plan.page,
        per_page: plan.limit,
        sort: plan.direction.as_str().to_string(),
    }))
}

/// Create a thought
#[utoipa::path(
    post,
    path = "/thought",
    request_body = ThoughtRequest,
    responses(
        (status = 201, description = "Thought created", body = ThoughtResponse),
        (status = 400, description = "Validation failure or duplicate content", body = crate::response::ErrorDetail)
    ),
    tag = "thoughts"
)]
pub async fn create_thought(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<EnvelopeResponse<ThoughtResponse>> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let thought = state.thoughts.create(&body).await?;

    Ok(created(thought_to_response(thought)))
}

/// Get a thought by id
#[utoipa::path(
    get,
    path = "/thought/{id}",
    params(
        ("id" = String, Path, description = "Thought ID")
    ),
    responses(
        (status = 200, description = "Thought details", body = ThoughtResponse),
        (status = 404, description = "Thought not found", body = crate::response::ErrorDetail)
    ),
    tag = "thoughts"
)]
pub async fn get_thought(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<EnvelopeResponse<ThoughtResponse>> {
    let id = thought_id(id)?;
    let thought = state.thoughts.get(&id).await?;
    Ok(ok(thought_to_response(thought)))
}

/// Edit the content fields of a thought
#[utoipa::path(
    patch,
    path = "/thought/{id}",
    params(
        ("id" = String, Path, description = "Thought ID")
    ),
    request_body = ThoughtRequest,
    responses(
        (status = 200, description = "Thought updated", body = ThoughtResponse),
        (status = 400, description = "Validation failure or duplicate content", body = crate::response::ErrorDetail),
        (status = 404, description = "Thought not found", body = crate::response::ErrorDetail)
    ),
    tag = "thoughts"
)]
pub async fn update_thought(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<EnvelopeResponse<ThoughtResponse>> {
    let id = thought_id(id)?;
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let thought = state.thoughts.update(&id, &body).await?;

    Ok(ok(thought_to_response(thought)))
}

/// Add one to a thought's resonance count
///
/// Also mounted at `/thought/{id}/like`.
#[utoipa::path(
    post,
    path = "/thought/{id}/score",
    params(
        ("id" = String, Path, description = "Thought ID")
    ),
    responses(
        (status = 200, description = "Thought after the increment", body = ThoughtResponse),
        (status = 404, description = "Thought not found", body = crate::response::ErrorDetail)
    ),
    tag = "thoughts"
)]
pub async fn score_thought(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<EnvelopeResponse<ThoughtResponse>> {
    let id = thought_id(id)?;
    let thought = state.thoughts.score(&id).await?;
    Ok(ok(thought_to_response(thought)))
}

/// Delete a thought
#[utoipa::path(
    delete,
    path = "/thought/{id}",
    params(
        ("id" = String, Path, description = "Thought ID")
    ),
    responses(
        (status = 200, description = "The deleted thought", body = ThoughtResponse),
        (status = 404, description = "Thought not found", body = crate::response::ErrorDetail)
    ),
    tag = "thoughts"
)]
pub async fn delete_thought(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<EnvelopeResponse<ThoughtResponse>> {
    let id = thought_id(id)?;
    let thought = state.thoughts.delete(&id).await?;
    Ok(ok(thought_to_response(thought)))
}

fn thought_id(id: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn thought_to_response(thought: Thought) -> ThoughtResponse {
    ThoughtResponse {
        id: thought.id,
        content: thought.content,
        secondary_text: thought.secondary_text,
        resonance_count: thought.resonance_count,
        created_at: thought.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_keys_keep_the_first_value() {
        let query = ListThoughtsQuery::from_pairs(pairs(&[
            ("page", "1"),
            ("page", "2"),
            ("per_page", "5"),
            ("perPage", "50"),
            ("colour", "blue"),
        ]));

        assert_eq!(query.page.as_deref(), Some("1"));
        assert_eq!(query.per_page.as_deref(), Some("5"));
        assert!(query.sort.is_none());
    }
}
