//! Project API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use sitegen_core::domain::project::Project;
use sitegen_core::domain::version::Version;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::project_service;

/// GET /projects/{slug}
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Project>> {
    tracing::debug!("Getting project: {}", slug);

    let project = project_service::get_project(state.store.as_ref(), &slug).await?;

    Ok(Json(project))
}

/// GET /projects/{slug}/versions
/// List a project's versions, newest first
pub async fn list_versions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Vec<Version>>> {
    tracing::debug!("Listing versions for project: {}", slug);

    let versions = project_service::list_versions(state.store.as_ref(), &slug).await?;

    Ok(Json(versions))
}
