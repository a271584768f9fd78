//! In-memory [`ProjectStore`]
//!
//! Used when the server runs without a database, and by tests. Nothing
//! survives a restart.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sitegen_core::domain::history::HistoryEntry;
use sitegen_core::domain::project::Project;
use sitegen_core::domain::version::Version;
use sitegen_pipeline::slug;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{PersistenceError, ProjectStore};

/// Rows are kept in insertion order, which is also creation order
#[derive(Default)]
struct Tables {
    projects: Vec<Project>,
    versions: Vec<Version>,
    history: Vec<HistoryEntry>,
    #[cfg(test)]
    reject_versions: bool,
}

impl Tables {
    /// Build a project under a free slug without storing it
    fn new_project(&self, prompt: &str, html: &str, model_id: &str) -> Project {
        let taken = |s: &str| self.projects.iter().any(|p| p.slug == s);

        let base = slug::slugify(prompt);
        let mut candidate = base.clone();
        while taken(&candidate) {
            candidate = slug::with_suffix(&base);
        }

        let now = Utc::now();
        Project {
            id: Uuid::new_v4(),
            slug: candidate,
            prompt: prompt.to_string(),
            html: html.to_string(),
            model_id: model_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of a stored project carrying the new artifact
    fn updated_project(
        &self,
        id: Uuid,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Project, PersistenceError> {
        let mut project = self
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(PersistenceError::ProjectNotFound(id))?;

        project.prompt = prompt.to_string();
        project.html = html.to_string();
        project.model_id = model_id.to_string();
        project.updated_at = Utc::now();

        Ok(project)
    }

    fn new_version(
        &self,
        project_id: Uuid,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Version, PersistenceError> {
        #[cfg(test)]
        if self.reject_versions {
            return Err(PersistenceError::Database(sqlx::Error::PoolClosed));
        }

        Ok(Version {
            id: Uuid::new_v4(),
            project_id,
            prompt: prompt.to_string(),
            html: html.to_string(),
            model_id: model_id.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Insert a project, or replace the stored row with the same ID
    fn put_project(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(stored) => *stored = project,
            None => self.projects.push(project),
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryProjectStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later version write fail with a database error
    #[cfg(test)]
    pub(crate) async fn reject_version_writes(&self) {
        self.tables.lock().await.reject_versions = true;
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn create_project(
        &self,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Project, PersistenceError> {
        let mut tables = self.tables.lock().await;
        let project = tables.new_project(prompt, html, model_id);
        tables.put_project(project.clone());

        Ok(project)
    }

    async fn save_generation(
        &self,
        project_id: Option<Uuid>,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<(Project, Version), PersistenceError> {
        let mut tables = self.tables.lock().await;

        // Both rows are built before either is stored
        let project = match project_id {
            Some(id) => tables.updated_project(id, prompt, html, model_id)?,
            None => tables.new_project(prompt, html, model_id),
        };
        let version = tables.new_version(project.id, prompt, html, model_id)?;

        tables.put_project(project.clone());
        tables.versions.push(version.clone());

        Ok((project, version))
    }

    async fn update_project(
        &self,
        id: Uuid,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Project, PersistenceError> {
        let mut tables = self.tables.lock().await;
        let project = tables.updated_project(id, prompt, html, model_id)?;
        tables.put_project(project.clone());

        Ok(project)
    }

    async fn append_version(
        &self,
        project_id: Uuid,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<Version, PersistenceError> {
        let mut tables = self.tables.lock().await;
        if !tables.projects.iter().any(|p| p.id == project_id) {
            return Err(PersistenceError::ProjectNotFound(project_id));
        }

        let version = tables.new_version(project_id, prompt, html, model_id)?;
        tables.versions.push(version.clone());

        Ok(version)
    }

    async fn list_versions(&self, project_id: Uuid) -> Result<Vec<Version>, PersistenceError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .versions
            .iter()
            .rev()
            .filter(|v| v.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, PersistenceError> {
        let tables = self.tables.lock().await;
        Ok(tables.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn find_project_by_slug(&self, slug: &str) -> Result<Option<Project>, PersistenceError> {
        let tables = self.tables.lock().await;
        Ok(tables.projects.iter().find(|p| p.slug == slug).cloned())
    }

    async fn record_history(
        &self,
        prompt: &str,
        html: &str,
        model_id: &str,
    ) -> Result<HistoryEntry, PersistenceError> {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            prompt: prompt.to_string(),
            html: html.to_string(),
            model_id: model_id.to_string(),
            created_at: Utc::now(),
        };
        self.tables.lock().await.history.push(entry.clone());

        Ok(entry)
    }

    async fn list_history(&self, limit: i64) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let tables = self.tables.lock().await;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(tables.history.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_project_uses_prompt_slug() {
        let store = InMemoryProjectStore::new();
        let project = store
            .create_project("Meu Site", "<html>1</html>", "gpt-4o-mini")
            .await
            .unwrap();

        assert_eq!(project.slug, "meu-site");
        assert_eq!(project.created_at, project.updated_at);
        assert_eq!(
            store.find_project_by_slug("meu-site").await.unwrap(),
            Some(project)
        );
    }

    #[tokio::test]
    async fn test_slug_collision_gets_suffix() {
        let store = InMemoryProjectStore::new();
        let first = store.create_project("Meu Site", "a", "m").await.unwrap();
        let second = store.create_project("meu site", "b", "m").await.unwrap();

        assert_eq!(first.slug, "meu-site");
        let suffix = second.slug.strip_prefix("meu-site-").unwrap();
        assert_eq!(suffix.len(), slug::SUFFIX_LEN);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_project_keeps_slug_and_creation_time() {
        let store = InMemoryProjectStore::new();
        let created = store.create_project("Loja", "v1", "m1").await.unwrap();
        let updated = store
            .update_project(created.id, "Loja azul", "v2", "m2")
            .await
            .unwrap();

        assert_eq!(updated.slug, created.slug);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.html, "v2");
        assert_eq!(updated.model_id, "m2");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_project() {
        let store = InMemoryProjectStore::new();
        let id = Uuid::new_v4();
        let err = store.update_project(id, "p", "h", "m").await.unwrap_err();

        assert!(matches!(err, PersistenceError::ProjectNotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_versions_listed_newest_first() {
        let store = InMemoryProjectStore::new();
        let project = store.create_project("Loja", "v1", "m").await.unwrap();
        let other = store.create_project("Outra", "x", "m").await.unwrap();

        for html in ["v1", "v2", "v3"] {
            store
                .append_version(project.id, "Loja", html, "m")
                .await
                .unwrap();
        }
        store.append_version(other.id, "Outra", "x", "m").await.unwrap();

        let versions = store.list_versions(project.id).await.unwrap();
        let htmls: Vec<_> = versions.iter().map(|v| v.html.as_str()).collect();
        assert_eq!(htmls, vec!["v3", "v2", "v1"]);
    }

    #[tokio::test]
    async fn test_append_version_requires_project() {
        let store = InMemoryProjectStore::new();
        let err = store
            .append_version(Uuid::new_v4(), "p", "h", "m")
            .await
            .unwrap_err();

        assert!(matches!(err, PersistenceError::ProjectNotFound(_)));
    }

    #[tokio::test]
    async fn test_save_generation_creates_project_and_version() {
        let store = InMemoryProjectStore::new();
        let (project, version) = store
            .save_generation(None, "Loja", "v1", "m")
            .await
            .unwrap();

        assert_eq!(project.slug, "loja");
        assert_eq!(version.project_id, project.id);
        assert_eq!(store.find_project(project.id).await.unwrap(), Some(project.clone()));
        assert_eq!(store.list_versions(project.id).await.unwrap(), vec![version]);
    }

    #[tokio::test]
    async fn test_save_generation_unknown_project_writes_nothing() {
        let store = InMemoryProjectStore::new();
        let id = Uuid::new_v4();
        let err = store
            .save_generation(Some(id), "p", "h", "m")
            .await
            .unwrap_err();

        assert!(matches!(err, PersistenceError::ProjectNotFound(missing) if missing == id));
        assert!(store.tables.lock().await.versions.is_empty());
    }

    #[tokio::test]
    async fn test_failed_version_write_leaves_project_untouched() {
        let store = InMemoryProjectStore::new();
        let existing = store.create_project("Loja", "v0", "m0").await.unwrap();
        store.append_version(existing.id, "Loja", "v0", "m0").await.unwrap();
        store.reject_version_writes().await;

        let err = store
            .save_generation(Some(existing.id), "Loja azul", "v1", "m1")
            .await
            .unwrap_err();
        assert!(matches!(err, PersistenceError::Database(_)));

        let err = store
            .save_generation(None, "Nova", "n1", "m1")
            .await
            .unwrap_err();
        assert!(matches!(err, PersistenceError::Database(_)));

        let tables = store.tables.lock().await;
        assert_eq!(tables.projects, vec![existing]);
        assert_eq!(tables.versions.len(), 1);
        assert_eq!(tables.versions[0].html, "v0");
    }

    #[tokio::test]
    async fn test_history_newest_first_with_limit() {
        let store = InMemoryProjectStore::new();
        for prompt in ["a", "b", "c"] {
            store.record_history(prompt, "h", "m").await.unwrap();
        }

        let entries = store.list_history(2).await.unwrap();
        let prompts: Vec<_> = entries.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["c", "b"]);
        assert!(store.list_history(-1).await.unwrap().is_empty());
    }
}
