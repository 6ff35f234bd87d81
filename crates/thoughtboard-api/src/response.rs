use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wrapper around every response body: `{ "response": ..., "success": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
    pub success: bool,
}

impl<T> Envelope<T> {
    pub fn success(response: T) -> Self {
        Self {
            response,
            success: true,
        }
    }

    pub fn failure(response: T) -> Self {
        Self {
            response,
            success: false,
        }
    }
}

/// What a handler hands back to axum on success
pub type EnvelopeResponse<T> = (StatusCode, Json<Envelope<T>>);

pub fn ok<T: Serialize>(payload: T) -> EnvelopeResponse<T> {
    (StatusCode::OK, Json(Envelope::success(payload)))
}

pub fn created<T: Serialize>(payload: T) -> EnvelopeResponse<T> {
    (StatusCode::CREATED, Json(Envelope::success(payload)))
}

/// Body of `response` when `success` is false
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// One of `validation`, `conflict`, `not_found`, `bad_request`, `internal`, `unavailable`
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: Option<&str>) -> Self {
        self.field = field.map(str::to_string);
        self
    }
}
