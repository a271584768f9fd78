//! Generation and health endpoints

use crate::SitegenClient;
use crate::error::Result;
use sitegen_core::dto::generate::{GenerateRequest, GenerateResponse};

impl SitegenClient {
    /// Generate a site
    ///
    /// Creates a new project, or a new version of `req.project_id` when set.
    pub async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse> {
        tracing::debug!("POST /generate (mode {:?})", req.mode());
        let response = self
            .client
            .post(self.url("/generate"))
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Check that the server is up
    pub async fn health(&self) -> Result<()> {
        let response = self.client.get(self.url("/health")).send().await?;

        self.handle_empty_response(response).await
    }
}
