//! Generation API Handler

use axum::{Json, body::Bytes, extract::State};
use sitegen_core::dto::generate::{GenerateRequest, GenerateResponse};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// POST /generate
/// Generate a site and persist it as a new project or a new version
///
/// The body is parsed as JSON whatever its content type; browser callers
/// post it as plain text.
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<GenerateResponse>> {
    let req: GenerateRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;

    let outcome = state.generation.generate(req).await?;

    Ok(Json(outcome.into()))
}
