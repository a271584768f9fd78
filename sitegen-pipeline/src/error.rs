//! Error types for the generation pipeline

use std::time::Duration;

use thiserror::Error;

use crate::stage::StageId;
use crate::state::Field;

/// Failure of a single model call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure talking to the provider
    #[error("request to model provider failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-success status (quota, auth, bad model, ...)
    #[error("model provider returned status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },

    /// The call did not complete within the configured bound
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    /// The provider answered but produced no text
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The provider answered with something that is not a completion
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if the provider rejected the call for rate or quota reasons
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::Api { status: 429, .. })
    }
}

/// Failure of a pipeline run
///
/// Any of these aborts the run; no partial state is returned.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The run input is unusable (blank prompt or model)
    #[error("invalid pipeline input: {0}")]
    Validation(String),

    /// A stage's model call failed; later stages were not invoked
    #[error("stage '{stage}' failed: {source}")]
    StageFailed {
        stage: StageId,
        #[source]
        source: ProviderError,
    },

    /// The single-call path's model call failed
    #[error("direct generation failed: {0}")]
    DirectFailed(#[source] ProviderError),

    /// A stage was invoked before one of its inputs was produced
    #[error("stage '{stage}' requires '{field}' which is not set")]
    MissingDependency { stage: StageId, field: Field },

    /// A delta tried to overwrite a field produced earlier
    #[error("field '{0}' is already set")]
    FieldAlreadySet(Field),

    /// The chain finished without producing every field
    #[error("pipeline finished without '{0}'")]
    Incomplete(Field),

    /// The caller cancelled the run
    #[error("generation cancelled")]
    Cancelled,
}

impl PipelineError {
    /// The stage that failed, when the failure belongs to one
    pub fn stage(&self) -> Option<StageId> {
        match self {
            Self::StageFailed { stage, .. } | Self::MissingDependency { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying provider failure, if any
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::StageFailed { source, .. } | Self::DirectFailed(source) => Some(source),
            _ => None,
        }
    }
}

/// Rejected chain definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("chain has no stages")]
    Empty,

    #[error("stage '{0}' appears more than once")]
    Duplicate(StageId),

    #[error("stage '{stage}' reads '{field}' which no earlier stage produces")]
    UnmetDependency { stage: StageId, field: Field },

    #[error("chain must end with the html stage, found '{0}'")]
    NotTerminal(StageId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failure_names_stage() {
        let err = PipelineError::StageFailed {
            stage: StageId::Content,
            source: ProviderError::api_error(429, "quota exceeded"),
        };

        assert_eq!(err.stage(), Some(StageId::Content));
        assert!(err.provider_error().is_some_and(ProviderError::is_quota));
        assert_eq!(
            err.to_string(),
            "stage 'content' failed: model provider returned status 429: quota exceeded"
        );
    }

    #[test]
    fn test_direct_failure_has_no_stage() {
        let err = PipelineError::DirectFailed(ProviderError::EmptyResponse);
        assert_eq!(err.stage(), None);
        assert!(err.provider_error().is_some());
    }
}
