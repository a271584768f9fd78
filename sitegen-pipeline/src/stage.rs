//! Stages
//!
//! The closed set of generation steps. Each stage owns one output field,
//! declares the fields it reads, and carries a fixed instruction template and
//! sampling temperature.

use std::fmt;

use crate::error::{PipelineError, ProviderError};
use crate::model::{ModelClient, ModelRequest};
use crate::state::{Field, PipelineState, StageOutput};
use crate::template;

/// Marker the html stage asks the model to start its answer with
pub const HTML_DOCTYPE: &str = "<!DOCTYPE html>";

/// One step of the generation chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    Structure,
    Content,
    Design,
    Html,
}

impl StageId {
    /// Every stage, in chain order
    pub const ALL: [StageId; 4] = [
        StageId::Structure,
        StageId::Content,
        StageId::Design,
        StageId::Html,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::Structure => "structure",
            StageId::Content => "content",
            StageId::Design => "design",
            StageId::Html => "html",
        }
    }

    /// The only field this stage writes
    pub fn output_field(&self) -> Field {
        match self {
            StageId::Structure => Field::Structure,
            StageId::Content => Field::Content,
            StageId::Design => Field::Design,
            StageId::Html => Field::HtmlCode,
        }
    }

    /// Produced fields this stage reads (the prompt is always available)
    pub fn dependencies(&self) -> &'static [Field] {
        match self {
            StageId::Structure => &[],
            StageId::Content => &[Field::Structure],
            StageId::Design => &[Field::Content],
            StageId::Html => &[Field::Structure, Field::Content, Field::Design],
        }
    }

    /// Structure and content lean deterministic; design and html explore more
    pub fn temperature(&self) -> f32 {
        match self {
            StageId::Structure => 0.2,
            StageId::Content => 0.2,
            StageId::Design => 0.4,
            StageId::Html => 0.3,
        }
    }

    /// Build this stage's instruction from the state
    ///
    /// Fails with [`PipelineError::MissingDependency`] when an input has not
    /// been produced yet. Only declared dependencies (and the prompt) are read.
    pub fn instruction(&self, state: &PipelineState) -> Result<String, PipelineError> {
        let instruction = match self {
            StageId::Structure => {
                template::render(template::STRUCTURE, &[("prompt", state.prompt())])
            }
            StageId::Content => {
                let structure = state.require(*self, Field::Structure)?;
                template::render(template::CONTENT, &[("structure", structure)])
            }
            StageId::Design => {
                let content = state.require(*self, Field::Content)?;
                template::render(template::DESIGN, &[("content", content)])
            }
            StageId::Html => {
                let structure = state.require(*self, Field::Structure)?;
                let content = state.require(*self, Field::Content)?;
                let design = state.require(*self, Field::Design)?;
                template::render(
                    template::HTML,
                    &[
                        ("structure", structure),
                        ("content", content),
                        ("design", design),
                    ],
                )
            }
        };

        Ok(instruction)
    }

    /// Build the model request for this stage
    pub fn request(&self, state: &PipelineState) -> Result<ModelRequest, PipelineError> {
        Ok(ModelRequest::new(
            self.instruction(state)?,
            state.model_id(),
            self.temperature(),
        ))
    }

    /// Run the stage once: one model call, no retry
    ///
    /// The model's text is returned as-is in the stage's own field.
    pub async fn run(
        &self,
        state: &PipelineState,
        client: &dyn ModelClient,
    ) -> Result<StageOutput, PipelineError> {
        let request = self.request(state)?;

        let text = client
            .generate(&request)
            .await
            .and_then(non_empty)
            .map_err(|source| PipelineError::StageFailed {
                stage: *self,
                source,
            })?;

        if *self == StageId::Html && !has_doctype(&text) {
            tracing::warn!(
                "Html stage output does not start with {} ({} bytes)",
                HTML_DOCTYPE,
                text.len()
            );
        }

        Ok(StageOutput::new(*self, text))
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the text opens with the doctype marker (case-insensitive)
pub fn has_doctype(html: &str) -> bool {
    html.trim_start()
        .get(..HTML_DOCTYPE.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(HTML_DOCTYPE))
}

pub(crate) fn non_empty(text: String) -> Result<String, ProviderError> {
    if text.trim().is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(text)
    }
}
