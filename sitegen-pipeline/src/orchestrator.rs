//! Pipeline orchestrator
//!
//! Walks the chain strictly in order. Each stage gets a shared reference to
//! the current state, makes its model call, and hands back a delta that is
//! merged before the next stage starts. The first failure ends the run and
//! the partial state is dropped.
//!
//! Every stage invocation is bounded by `stage_timeout` and races the run's
//! cancellation token.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::chain::Chain;
use crate::error::{PipelineError, ProviderError};
use crate::model::ModelClient;
use crate::stage::StageId;
use crate::state::{PipelineState, SiteArtifact};

/// Default bound on a single model call
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Hooks called as a run progresses
pub trait StageObserver: Send + Sync {
    fn stage_started(&self, _stage: StageId) {}

    /// Called after the stage's output has been merged
    fn stage_completed(&self, _stage: StageId, _state: &PipelineState, _elapsed: Duration) {}

    fn stage_failed(&self, _stage: StageId, _error: &PipelineError) {}
}

/// Observer that ignores every event
pub struct NoopObserver;

impl StageObserver for NoopObserver {}

/// Staged generation pipeline
#[derive(Clone)]
pub struct Pipeline {
    client: Arc<dyn ModelClient>,
    chain: Chain,
    stage_timeout: Duration,
}

impl Pipeline {
    /// Create a pipeline over the standard chain
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            chain: Chain::standard(),
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
        }
    }

    pub fn with_chain(mut self, chain: Chain) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn stage_timeout(&self) -> Duration {
        self.stage_timeout
    }

    pub(crate) fn client(&self) -> &dyn ModelClient {
        self.client.as_ref()
    }

    /// Run every stage and return the finished artifact
    pub async fn run(&self, initial: PipelineState) -> Result<SiteArtifact, PipelineError> {
        self.run_observed(initial, &CancellationToken::new(), &NoopObserver)
            .await
    }

    /// Like [`Pipeline::run`], stopping early when `cancel` fires
    pub async fn run_with_cancel(
        &self,
        initial: PipelineState,
        cancel: &CancellationToken,
    ) -> Result<SiteArtifact, PipelineError> {
        self.run_observed(initial, cancel, &NoopObserver).await
    }

    /// Like [`Pipeline::run_with_cancel`], reporting progress to `observer`
    pub async fn run_observed(
        &self,
        initial: PipelineState,
        cancel: &CancellationToken,
        observer: &dyn StageObserver,
    ) -> Result<SiteArtifact, PipelineError> {
        validate_input(initial.prompt(), initial.model_id())?;

        info!(
            "Starting staged generation: model={}, stages={}",
            initial.model_id(),
            self.chain.len()
        );
        let run_started = Instant::now();
        let mut state = initial;

        for stage in self.chain.stages() {
            observer.stage_started(*stage);
            debug!(
                "Running stage '{}' (temperature {})",
                stage,
                stage.temperature()
            );

            let started = Instant::now();
            let called = self
                .bounded(stage.run(&state, self.client()), cancel, |source| {
                    PipelineError::StageFailed {
                        stage: *stage,
                        source,
                    }
                })
                .await;

            // A rejected merge fails the stage like a failed call
            let merged = called.and_then(|output| {
                let produced = output.text.len();
                state.merge(output).map(|next| (next, produced))
            });

            let produced = match merged {
                Ok((next, produced)) => {
                    state = next;
                    produced
                }
                Err(e) => {
                    error!("Stage '{}' failed, aborting run: {}", stage, e);
                    observer.stage_failed(*stage, &e);
                    return Err(e);
                }
            };

            let elapsed = started.elapsed();
            debug!(
                "Stage '{}' completed in {} ms ({} bytes)",
                stage,
                elapsed.as_millis(),
                produced
            );
            observer.stage_completed(*stage, &state, elapsed);
        }

        let artifact = state.into_artifact()?;
        info!(
            "Staged generation finished in {} ms",
            run_started.elapsed().as_millis()
        );

        Ok(artifact)
    }

    /// Bound a model-call future by the stage timeout and the cancel token
    pub(crate) async fn bounded<T, F>(
        &self,
        call: F,
        cancel: &CancellationToken,
        on_timeout: impl FnOnce(ProviderError) -> PipelineError,
    ) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, PipelineError>>,
    {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PipelineError::Cancelled),
            result = tokio::time::timeout(self.stage_timeout, call) => match result {
                Ok(result) => result,
                Err(_) => Err(on_timeout(ProviderError::Timeout(self.stage_timeout))),
            },
        }
    }
}

pub(crate) fn validate_input(prompt: &str, model_id: &str) -> Result<(), PipelineError> {
    if prompt.trim().is_empty() {
        return Err(PipelineError::Validation(
            "prompt cannot be empty".to_string(),
        ));
    }

    if model_id.trim().is_empty() {
        return Err(PipelineError::Validation(
            "model cannot be empty".to_string(),
        ));
    }

    Ok(())
}
