//! Single-call generation
//!
//! The non-staged path: one model call with a fixed web-designer system
//! message writes the whole page. It shares the staged path's input checks,
//! timeout and cancellation.

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::PipelineError;
use crate::model::ModelRequest;
use crate::orchestrator::{Pipeline, validate_input};
use crate::stage::non_empty;
use crate::template;

/// Provider default; the single-call path never tuned it
pub const DIRECT_TEMPERATURE: f32 = 1.0;

pub(crate) fn direct_request(prompt: &str, model_id: &str) -> ModelRequest {
    ModelRequest::new(
        template::render(template::DIRECT_USER, &[("prompt", prompt)]),
        model_id,
        DIRECT_TEMPERATURE,
    )
    .with_system(template::DIRECT_SYSTEM.trim_end())
}

impl Pipeline {
    /// Generate the html with a single model call
    pub async fn run_direct(
        &self,
        prompt: &str,
        model_id: &str,
        cancel: &CancellationToken,
    ) -> Result<String, PipelineError> {
        validate_input(prompt, model_id)?;
        info!("Starting direct generation: model={}", model_id);

        let request = direct_request(prompt, model_id);
        let call = async {
            self.client()
                .generate(&request)
                .await
                .and_then(non_empty)
                .map_err(PipelineError::DirectFailed)
        };

        let html = self
            .bounded(call, cancel, PipelineError::DirectFailed)
            .await
            .inspect_err(|e| error!("Direct generation failed: {}", e))?;

        info!("Direct generation finished ({} bytes)", html.len());
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::testing::ScriptedClient;
    use std::sync::Arc;

    #[test]
    fn test_direct_request_shape() {
        let request = direct_request("loja de bicicletas", "gpt-4o");

        assert_eq!(
            request.prompt,
            "Crie um site com base nesta descrição: loja de bicicletas"
        );
        assert_eq!(request.model_id, "gpt-4o");
        assert_eq!(request.temperature, DIRECT_TEMPERATURE);
        assert!(
            request
                .system
                .as_deref()
                .is_some_and(|s| s.contains("<!DOCTYPE html>"))
        );
    }

    #[tokio::test]
    async fn test_run_direct_returns_model_text_unchanged() {
        let html = "<!DOCTYPE html>\n<html><body>Bikes</body></html>\n";
        let client = Arc::new(ScriptedClient::replying(&[html]));
        let pipeline = Pipeline::new(client.clone());

        let out = pipeline
            .run_direct("loja de bicicletas", "gpt-4o", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(out, html);
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_run_direct_surfaces_provider_error() {
        let client = Arc::new(ScriptedClient::new(vec![Err(ProviderError::api_error(
            401,
            "invalid api key",
        ))]));

        let err = Pipeline::new(client)
            .run_direct("loja", "gpt-4o", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::DirectFailed(ProviderError::Api { status: 401, .. })
        ));
        assert_eq!(err.stage(), None);
    }
}
