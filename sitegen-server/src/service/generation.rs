//! Generation Service
//!
//! Runs one generation request end to end: input checks, the staged
//! pipeline or the single-call path, then the project and version writes
//! followed by the history row. Nothing is written unless the model side
//! succeeded.

use std::sync::Arc;

use sitegen_core::domain::project::Project;
use sitegen_core::dto::generate::{GenerateRequest, GenerateResponse, GenerationMode};
use sitegen_pipeline::{CancellationToken, Pipeline, PipelineError, PipelineState, SiteArtifact};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::repository::{PersistenceError, ProjectStore};

/// Service error type
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Validation(String),

    #[error("project {0} not found")]
    ProjectNotFound(Uuid),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl GenerateError {
    /// Stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Pipeline(PipelineError::Validation(_)) => "validation",
            Self::ProjectNotFound(_) => "not_found",
            Self::Pipeline(PipelineError::Cancelled) => "cancelled",
            Self::Pipeline(e) if e.provider_error().is_some() => "provider",
            Self::Pipeline(_) => "pipeline",
            Self::Persistence(_) => "persistence",
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// A persisted generation
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub html: String,
    /// Intermediate outputs, present for staged runs only
    pub artifact: Option<SiteArtifact>,
    pub project: Project,
}

impl From<GenerationOutcome> for GenerateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        let (structure, content, design) = match outcome.artifact {
            Some(a) => (Some(a.structure), Some(a.content), Some(a.design)),
            None => (None, None, None),
        };

        GenerateResponse {
            html: outcome.html,
            structure,
            content,
            design,
            project_id: outcome.project.id,
            slug: outcome.project.slug,
        }
    }
}

#[derive(Clone)]
pub struct GenerationService {
    pipeline: Pipeline,
    store: Arc<dyn ProjectStore>,
    default_model: String,
}

impl GenerationService {
    pub fn new(
        pipeline: Pipeline,
        store: Arc<dyn ProjectStore>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            pipeline,
            store,
            default_model: default_model.into(),
        }
    }

    pub async fn generate(&self, req: GenerateRequest) -> Result<GenerationOutcome> {
        self.generate_with_cancel(req, &CancellationToken::new())
            .await
    }

    pub async fn generate_with_cancel(
        &self,
        req: GenerateRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationOutcome> {
        if req.prompt.trim().is_empty() {
            return Err(GenerateError::Validation("Prompt is required".to_string()));
        }

        let model_id = self.resolve_model(req.model.as_deref()).to_string();

        // Unknown projects are rejected before spending any model calls
        if let Some(id) = req.project_id {
            if self.store.find_project(id).await?.is_none() {
                return Err(GenerateError::ProjectNotFound(id));
            }
        }

        let mode = req.mode();
        info!(
            "Generating site: mode={:?}, model={}, project={:?}",
            mode, model_id, req.project_id
        );

        let (html, artifact) = match mode {
            GenerationMode::Staged => {
                let initial = PipelineState::new(req.prompt.as_str(), model_id.as_str());
                let artifact = self.pipeline.run_with_cancel(initial, cancel).await?;
                (artifact.html_code.clone(), Some(artifact))
            }
            GenerationMode::Direct => {
                let html = self
                    .pipeline
                    .run_direct(&req.prompt, &model_id, cancel)
                    .await?;
                (html, None)
            }
        };

        let project = self
            .persist(&req.prompt, &model_id, req.project_id, &html)
            .await?;

        info!(
            "Site generated: project={} ({}), {} bytes",
            project.slug,
            project.id,
            html.len()
        );

        Ok(GenerationOutcome {
            html,
            artifact,
            project,
        })
    }

    /// Store the project and its new version together, then log the history row
    ///
    /// The html handed to every write is exactly the generated text.
    async fn persist(
        &self,
        prompt: &str,
        model_id: &str,
        project_id: Option<Uuid>,
        html: &str,
    ) -> Result<Project> {
        let (project, _) = self
            .store
            .save_generation(project_id, prompt, html, model_id)
            .await?;

        // History is a convenience log; a failed insert does not fail the request
        if let Err(e) = self.store.record_history(prompt, html, model_id).await {
            warn!("Failed to record history entry: {}", e);
        }

        Ok(project)
    }

    fn resolve_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model)
    }
}
