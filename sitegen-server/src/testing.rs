//! Test doubles shared by the service and API tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sitegen_pipeline::{ModelClient, ModelRequest, ProviderError};

/// Numbers its replies and can be told to fail on one call
pub(crate) struct FakeModel {
    calls: AtomicUsize,
    fail_at: Option<usize>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl FakeModel {
    pub(crate) fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_at: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail the call with this zero-based index
    pub(crate) fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::new()
        }
    }

    /// The text returned for the call with this zero-based index
    pub(crate) fn reply(call: usize) -> String {
        format!("<!DOCTYPE html>\n<p>reply {}</p>\n", call)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for FakeModel {
    async fn generate(&self, request: &ModelRequest) -> Result<String, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if self.fail_at == Some(call) {
            return Err(ProviderError::api_error(500, "upstream exploded"));
        }
        Ok(Self::reply(call))
    }
}
