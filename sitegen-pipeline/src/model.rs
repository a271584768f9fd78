//! Model client abstraction
//!
//! The pipeline depends only on [`ModelClient`]. Backends (the OpenAI
//! provider, test doubles) implement it and are injected as
//! `Arc<dyn ModelClient>`.

use async_trait::async_trait;

use crate::error::ProviderError;

/// A single text-generation call
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    /// Optional system message sent ahead of the prompt
    pub system: Option<String>,
    /// The instruction text
    pub prompt: String,
    /// Provider model identifier (e.g. "gpt-4o-mini")
    pub model_id: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl ModelRequest {
    pub fn new(prompt: impl Into<String>, model_id: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            model_id: model_id.into(),
            temperature,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Text-generation backend
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate text for the request
    ///
    /// Implementations perform exactly one attempt; callers decide what a
    /// failure means.
    async fn generate(&self, request: &ModelRequest) -> Result<String, ProviderError>;
}
