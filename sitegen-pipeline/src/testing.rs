//! Model client doubles for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::model::{ModelClient, ModelRequest};

/// Replies from a fixed script and records every request it receives
pub(crate) struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedClient {
    pub(crate) fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub(crate) fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn generate(&self, request: &ModelRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::MalformedResponse("script exhausted".into())))
    }
}

/// Never answers
pub(crate) struct HangingClient;

#[async_trait]
impl ModelClient for HangingClient {
    async fn generate(&self, _request: &ModelRequest) -> Result<String, ProviderError> {
        std::future::pending().await
    }
}
