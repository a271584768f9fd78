//! Pipeline state
//!
//! The value threaded through one run. Every produced field starts unset and
//! is filled exactly once, by the stage that owns it. Stages only ever see a
//! shared reference; the orchestrator builds the next state by merging the
//! stage's [`StageOutput`] into the previous one.

use std::fmt;

use crate::error::PipelineError;
use crate::stage::StageId;

/// A field produced by a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Structure,
    Content,
    Design,
    HtmlCode,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Structure,
        Field::Content,
        Field::Design,
        Field::HtmlCode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Structure => "structure",
            Field::Content => "content",
            Field::Design => "design",
            Field::HtmlCode => "html_code",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The delta a stage returns: its own field's text and nothing else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub stage: StageId,
    pub text: String,
}

impl StageOutput {
    pub fn new(stage: StageId, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    pub fn field(&self) -> Field {
        self.stage.output_field()
    }
}

/// Incrementally populated record for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineState {
    prompt: String,
    model_id: String,
    structure: Option<String>,
    content: Option<String>,
    design: Option<String>,
    html_code: Option<String>,
}

impl PipelineState {
    /// Entry state: prompt and model set, every produced field unset
    pub fn new(prompt: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_id: model_id.into(),
            structure: None,
            content: None,
            design: None,
            html_code: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Read a field a stage depends on, failing if it has not been produced
    pub fn require(&self, stage: StageId, field: Field) -> Result<&str, PipelineError> {
        self.get(field)
            .ok_or(PipelineError::MissingDependency { stage, field })
    }

    /// Fields set so far, in chain order
    pub fn populated(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.slot(*f).is_some())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.populated().len() == Field::ALL.len()
    }

    /// Produce the next state by applying a stage's delta
    ///
    /// Fails if the stage's inputs are not all set or if its field was
    /// already produced.
    pub fn merge(mut self, output: StageOutput) -> Result<Self, PipelineError> {
        for dep in output.stage.dependencies() {
            self.require(output.stage, *dep)?;
        }

        let field = output.field();
        let slot = self.slot_mut(field);
        if slot.is_some() {
            return Err(PipelineError::FieldAlreadySet(field));
        }
        *slot = Some(output.text);

        Ok(self)
    }

    /// Convert a finished state into the run's result
    pub fn into_artifact(self) -> Result<SiteArtifact, PipelineError> {
        Ok(SiteArtifact {
            structure: self.structure.ok_or(PipelineError::Incomplete(Field::Structure))?,
            content: self.content.ok_or(PipelineError::Incomplete(Field::Content))?,
            design: self.design.ok_or(PipelineError::Incomplete(Field::Design))?,
            html_code: self.html_code.ok_or(PipelineError::Incomplete(Field::HtmlCode))?,
        })
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Structure => &self.structure,
            Field::Content => &self.content,
            Field::Design => &self.design,
            Field::HtmlCode => &self.html_code,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Structure => &mut self.structure,
            Field::Content => &mut self.content,
            Field::Design => &mut self.design,
            Field::HtmlCode => &mut self.html_code,
        }
    }
}

/// Output of a successful staged run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteArtifact {
    pub structure: String,
    pub content: String,
    pub design: String,
    pub html_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_through(stages: &[StageId]) -> PipelineState {
        stages
            .iter()
            .fold(PipelineState::new("meu site", "gpt-4o-mini"), |state, stage| {
                state
                    .merge(StageOutput::new(*stage, format!("{} text", stage)))
                    .unwrap()
            })
    }

    #[test]
    fn test_new_state_has_only_inputs() {
        let state = PipelineState::new("meu site", "gpt-4o-mini");
        assert_eq!(state.prompt(), "meu site");
        assert_eq!(state.model_id(), "gpt-4o-mini");
        assert!(state.populated().is_empty());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_merge_in_order_completes_state() {
        let state = filled_through(&StageId::ALL);
        assert!(state.is_complete());

        let artifact = state.into_artifact().unwrap();
        assert_eq!(artifact.structure, "structure text");
        assert_eq!(artifact.html_code, "html text");
    }

    #[test]
    fn test_merge_rejects_out_of_order_delta() {
        let state = PipelineState::new("meu site", "gpt-4o-mini");
        let result = state.merge(StageOutput::new(StageId::Design, "too early"));

        assert!(matches!(
            result,
            Err(PipelineError::MissingDependency {
                stage: StageId::Design,
                field: Field::Content
            })
        ));
    }

    #[test]
    fn test_merge_rejects_overwrite() {
        let state = filled_through(&[StageId::Structure]);
        let result = state.merge(StageOutput::new(StageId::Structure, "again"));

        assert!(matches!(
            result,
            Err(PipelineError::FieldAlreadySet(Field::Structure))
        ));
    }

    #[test]
    fn test_merge_leaves_previous_state_untouched() {
        let before = filled_through(&[StageId::Structure]);
        let after = before
            .clone()
            .merge(StageOutput::new(StageId::Content, "content text"))
            .unwrap();

        assert_eq!(before.get(Field::Content), None);
        assert_eq!(after.get(Field::Content), Some("content text"));
        assert_eq!(after.get(Field::Structure), before.get(Field::Structure));
    }

    #[test]
    fn test_incomplete_state_is_not_an_artifact() {
        let state = filled_through(&[StageId::Structure, StageId::Content]);
        assert!(matches!(
            state.into_artifact(),
            Err(PipelineError::Incomplete(Field::Design))
        ));
    }
}
