//! OpenAI chat-completions provider

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::model::{ModelClient, ModelRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for the OpenAI API
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// API root, without the trailing `/chat/completions`
    pub base_url: String,
    /// Sent as the `OpenAI-Project` header when set
    pub project: Option<String>,
    /// Transport-level timeout for one HTTP request
    pub request_timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            project: None,
            request_timeout: Duration::from_secs(180),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("project", &self.project)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// [`ModelClient`] backed by `POST {base_url}/chat/completions`
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a client on top of a preconfigured reqwest client
    pub fn with_client(config: OpenAiConfig, client: Client) -> Self {
        let endpoint = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        Self {
            client,
            endpoint,
            config,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<String, ProviderError> {
        tracing::debug!(
            "Calling {} (model {}, {} prompt bytes)",
            self.endpoint,
            request.model_id,
            request.prompt.len()
        );

        let mut builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest::from_request(request));

        if let Some(project) = &self.config.project {
            builder = builder.header("OpenAI-Project", project);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::api_error(
                status.as_u16(),
                error_message(&body),
            ));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        extract_content(body)
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

impl<'a> ChatRequest<'a> {
    fn from_request(request: &'a ModelRequest) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        Self {
            model: &request.model_id,
            temperature: request.temperature,
            messages,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

// =============================================================================
// Helper Functions
// =============================================================================

fn extract_content(response: ChatResponse) -> Result<String, ProviderError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        ProviderError::MalformedResponse("response contained no choices".to_string())
    })?;

    match choice.message.content {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ProviderError::EmptyResponse),
    }
}

/// Pull the provider's message out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        })
}
