//! Project Service
//!
//! Read access to projects, their versions and the generation history.

use sitegen_core::domain::history::HistoryEntry;
use sitegen_core::domain::project::Project;
use sitegen_core::domain::version::Version;
use thiserror::Error;

use crate::repository::{DEFAULT_HISTORY_LIMIT, PersistenceError, ProjectStore};

/// Largest history page a caller can ask for
pub const MAX_HISTORY_LIMIT: i64 = 500;

/// Service error type
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, ProjectError>;

/// Get a project by slug
pub async fn get_project(store: &dyn ProjectStore, slug: &str) -> Result<Project> {
    store
        .find_project_by_slug(slug)
        .await?
        .ok_or_else(|| ProjectError::NotFound(slug.to_string()))
}

/// List a project's versions, newest first
pub async fn list_versions(store: &dyn ProjectStore, slug: &str) -> Result<Vec<Version>> {
    let project = get_project(store, slug).await?;
    Ok(store.list_versions(project.id).await?)
}

/// List the most recent generations, newest first
pub async fn list_history(store: &dyn ProjectStore, limit: Option<i64>) -> Result<Vec<HistoryEntry>> {
    let limit = limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    Ok(store.list_history(limit).await?)
}
