//! Mock driver for testing.

use async_trait::async_trait;
use cms_architect_core::{GenerateRequest, GenerateResponse, Output};
use cms_architect_error::{ArchitectError, ArchitectResult, GeminiError, GeminiErrorKind};
use cms_architect_interface::ArchitectDriver;
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the given structured JSON output
    Json(serde_json::Value),
    /// Always return the specified error
    Error(GeminiErrorKind),
    /// Never settle
    Hang,
    /// Return a sequence of responses (errors or success)
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(GeminiErrorKind),
}

/// Mock driver that records every request it receives.
pub struct MockDriver {
    behavior: MockBehavior,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockDriver {
    /// Create a mock driver with custom behavior.
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock driver that always succeeds with the given text.
    #[allow(dead_code)]
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Success(text.into()))
    }

    /// Create a mock driver that always fails with the given error.
    #[allow(dead_code)]
    pub fn new_error(error: GeminiErrorKind) -> Self {
        Self::new(MockBehavior::Error(error))
    }

    /// Get the number of times generate() was called.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far, in order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn text(text: &str) -> GenerateResponse {
        GenerateResponse {
            outputs: vec![Output::Text(text.to_string())],
        }
    }

    fn error(kind: &GeminiErrorKind) -> ArchitectError {
        ArchitectError::from(GeminiError::new(kind.clone()))
    }
}

#[async_trait]
impl ArchitectDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> ArchitectResult<GenerateResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(req.clone());
            requests.len() - 1
        };

        tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;

        match &self.behavior {
            MockBehavior::Success(text) => Ok(Self::text(text)),
            MockBehavior::Json(value) => Ok(GenerateResponse {
                outputs: vec![Output::Json(value.clone())],
            }),
            MockBehavior::Error(kind) => Err(Self::error(kind)),
            MockBehavior::Hang => std::future::pending().await,
            MockBehavior::Sequence(responses) => match responses.get(index) {
                Some(MockResponse::Success(text)) => Ok(Self::text(text)),
                Some(MockResponse::Error(kind)) => Err(Self::error(kind)),
                None => Err(Self::error(&GeminiErrorKind::ApiRequest(format!(
                    "Mock sequence exhausted (call {} beyond {} responses)",
                    index + 1,
                    responses.len()
                )))),
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
