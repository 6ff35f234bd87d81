use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use thoughtboard_persist::PersistError;
use thoughtboard_types::ValidationError;

use crate::response::{Envelope, ErrorDetail};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No thought with id {0}")]
    ThoughtNotFound(String),

    #[error("No route for {0}")]
    RouteNotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{field} must be unique")]
    Conflict { field: String },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

impl ApiError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            ApiError::ThoughtNotFound(_) | ApiError::RouteNotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("not_found", self.to_string()),
            ),
            ApiError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorDetail::new("method_not_allowed", self.to_string()),
            ),
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("validation", e.to_string()).with_field(e.field()),
            ),
            ApiError::Conflict { field } | ApiError::Persist(PersistError::Conflict { field }) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("conflict", format!("{} must be unique", field)).with_field(Some(field)),
            ),
            ApiError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("bad_request", self.to_string()),
            ),
            ApiError::Persist(e) => {
                tracing::error!("Persistence error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail::new("internal", "Storage error"),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(Envelope::failure(detail))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
