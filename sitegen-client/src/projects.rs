//! Project, version and history endpoints

use crate::SitegenClient;
use crate::error::Result;
use sitegen_core::domain::history::HistoryEntry;
use sitegen_core::domain::project::Project;
use sitegen_core::domain::version::Version;

impl SitegenClient {
    // =============================================================================
    // Projects
    // =============================================================================

    /// Get a project by slug
    pub async fn get_project(&self, slug: &str) -> Result<Project> {
        let url = self.url(&format!("/projects/{}", slug));
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// List a project's versions, newest first
    pub async fn list_versions(&self, slug: &str) -> Result<Vec<Version>> {
        let url = self.url(&format!("/projects/{}/versions", slug));
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // History
    // =============================================================================

    /// List recent generations, newest first
    ///
    /// The server applies its own default when `limit` is `None`.
    pub async fn list_history(&self, limit: Option<i64>) -> Result<Vec<HistoryEntry>> {
        let mut request = self.client.get(self.url("/history"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }
}
