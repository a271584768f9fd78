//! Repository Module
//!
//! Data access layer for the server. The Postgres modules hold one set of
//! queries per table; [`ProjectStore`] is the seam the services talk to, with
//! a Postgres and an in-memory implementation behind it.

pub mod history;
mod memory;
mod postgres;
pub mod project;
pub mod version;

use async_trait::async_trait;
use sitegen_core::domain::history::HistoryEntry;
use sitegen_core::domain::project::Project;
use sitegen_core::domain::version::Version;
use thiserror::Error;
use uuid::Uuid;

pub use memory::InMemoryProjectStore;
pub use postgres::PgProjectStore;

/// Number of history entries returned when the caller gives no limit
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Errors raised by a [`ProjectStore`]
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("could not allocate a unique slug for '{0}'")]
    SlugExhausted(String),
}

/// Storage for projects, their versions and the generation history
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Create a project whose slug is derived from the prompt
    ///
    /// When the base slug is taken a random `-xxxxxx` suffix is appended.
    async fn create_project(
        &self,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Project, PersistenceError>;

    /// Replace a project's current prompt, html and model
    async fn update_project(
        &self,
        id: Uuid,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Project, PersistenceError>;

    /// Store the result of one generation
    ///
    /// Creates a project (or updates `project_id` when given) and appends the
    /// matching version as a single unit: either both writes land or neither.
    async fn save_generation(
        &self,
        project_id: Option<Uuid>,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<(Project, Version), PersistenceError>;

    /// Append an immutable snapshot to a project
    async fn append_version(
        &self,
        project_id: Uuid,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Version, PersistenceError>;

    /// Versions of a project, newest first
    async fn list_versions(&self, project_id: Uuid) -> Result<Vec<Version>, PersistenceError>;

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, PersistenceError>;

    async fn find_project_by_slug(&self, slug: &str) -> Result<Option<Project>, PersistenceError>;

    /// Log one successful generation
    async fn record_history(
        &self,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<HistoryEntry, PersistenceError>;

    /// History entries, newest first
    async fn list_history(&self, limit: i64) -> Result<Vec<HistoryEntry>, PersistenceError>;
}
