//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sitegen_core::dto::error::ErrorResponse;
use sitegen_pipeline::PipelineError;

use crate::repository::PersistenceError;
use crate::service::GenerateError;
use crate::service::project::ProjectError;

/// Message returned for every generation failure that is not the caller's fault
pub const GENERATION_FAILED: &str = "Failed to generate site";

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Persistence(PersistenceError),
    GenerationFailed(GenerateError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Persistence(err) => {
                tracing::error!("Persistence error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::GenerationFailed(err) => {
                tracing::error!(kind = err.kind(), "Generation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERATION_FAILED.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Validation(msg) | GenerateError::Pipeline(PipelineError::Validation(msg)) => {
                ApiError::BadRequest(msg)
            }
            GenerateError::ProjectNotFound(id) => {
                ApiError::NotFound(format!("Project {} not found", id))
            }
            other => ApiError::GenerationFailed(other),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(slug) => ApiError::NotFound(format!("Project '{}' not found", slug)),
            ProjectError::Persistence(err) => ApiError::Persistence(err),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
