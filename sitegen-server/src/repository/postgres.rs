//! Postgres-backed [`ProjectStore`]

use async_trait::async_trait;
use sitegen_core::domain::history::HistoryEntry;
use sitegen_core::domain::project::Project;
use sitegen_core::domain::version::Version;
use sitegen_pipeline::slug;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::{PersistenceError, ProjectStore, history, project, version};

/// Suffixed slugs tried after the base slug before giving up
const SLUG_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert a project, retrying with suffixed slugs while the slug is taken
async fn insert_project(
    conn: &mut PgConnection,
    prompt: &str,
    html: &str,
    model_id: &str,
) -> Result<Project, PersistenceError> {
    let base = slug::slugify(prompt);
    let mut candidate = base.clone();

    for _ in 0..=SLUG_ATTEMPTS {
        let created = project::create(&mut *conn, &candidate, prompt, html, model_id).await?;
        if let Some(created) = created {
            return Ok(created);
        }
        tracing::debug!("Slug '{}' taken, retrying with a suffix", candidate);
        candidate = slug::with_suffix(&base);
    }

    Err(PersistenceError::SlugExhausted(base))
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn create_project(
        &self,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Project, PersistenceError> {
        let mut conn = self.pool.acquire().await?;
        insert_project(&mut conn, prompt, html, model_id).await
    }

    async fn save_generation(
        &self,
        project_id: Option<Uuid>,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<(Project, Version), PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let saved = match project_id {
            Some(id) => project::update(&mut *tx, id, prompt, html, model_id)
                .await?
                .ok_or(PersistenceError::ProjectNotFound(id))?,
            None => insert_project(&mut tx, prompt, html, model_id).await?,
        };
        let snapshot = version::append(&mut *tx, saved.id, prompt, html, model_id).await?;

        // Dropping `tx` on any early return above rolls both writes back
        tx.commit().await?;

        Ok((saved, snapshot))
    }

    async fn update_project(
        &self,
        id: Uuid,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Project, PersistenceError> {
        project::update(&self.pool, id, prompt, html, model_id)
            .await?
            .ok_or(PersistenceError::ProjectNotFound(id))
    }

    async fn append_version(
        &self,
        project_id: Uuid,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Version, PersistenceError> {
        Ok(version::append(&self.pool, project_id, prompt, html, model_id).await?)
    }

    async fn list_versions(&self, project_id: Uuid) -> Result<Vec<Version>, PersistenceError> {
        Ok(version::list_by_project(&self.pool, project_id).await?)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, PersistenceError> {
        Ok(project::find_by_id(&self.pool, id).await?)
    }

    async fn find_project_by_slug(&self, slug: &str) -> Result<Option<Project>, PersistenceError> {
        Ok(project::find_by_slug(&self.pool, slug).await?)
    }

    async fn record_history(
        &self,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<HistoryEntry, PersistenceError> {
        Ok(history::record(&self.pool, prompt, html, model_id).await?)
    }

    async fn list_history(&self, limit: i64) -> Result<Vec<HistoryEntry>, PersistenceError> {
        Ok(history::list(&self.pool, limit).await?)
    }
}
