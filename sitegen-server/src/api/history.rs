//! History API Handler

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use sitegen_core::domain::history::HistoryEntry;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::service::project_service;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// GET /history
/// List recent generations, newest first
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<HistoryEntry>>> {
    let entries = project_service::list_history(state.store.as_ref(), query.limit).await?;
    Ok(Json(entries))
}
