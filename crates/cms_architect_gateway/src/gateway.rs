//! The response gateway: one provider call per request, no retries.

use crate::{PromptBuilder, artifacts_from_value, parse_artifacts};
use cms_architect_config::ArchitectConfig;
use cms_architect_core::{GenerateRequest, GenerateResponse, GeneratedArtifacts, Message};
use cms_architect_error::{
    ArchitectError, ArchitectErrorKind, GeminiErrorKind, ProviderError, ProviderErrorKind,
    ProviderResult,
};
use cms_architect_interface::ArchitectDriver;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Reply used when the provider answers a chat turn without text.
pub const CHAT_EMPTY_FALLBACK: &str = "I'm sorry, I couldn't generate a response.";

/// Reply used when a chat turn fails for any reason.
pub const CHAT_ERROR_FALLBACK: &str = "Error communicating with the architect.";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Issues provider calls and enforces the response contract.
///
/// Every call is bounded by a timeout and a cancellation token. A generation
/// call either yields a complete, validated artifact set or a
/// [`ProviderError`]; a chat call always yields reply text.
#[derive(Clone)]
pub struct ResponseGateway {
    driver: Arc<dyn ArchitectDriver>,
    prompts: PromptBuilder,
    timeout: Duration,
}

impl std::fmt::Debug for ResponseGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseGateway")
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("prompts", &self.prompts)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ResponseGateway {
    /// Gateway with default prompts and a 120 second timeout.
    pub fn new(driver: Arc<dyn ArchitectDriver>) -> Self {
        Self {
            driver,
            prompts: PromptBuilder::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Gateway using the timeout and sampling settings from configuration.
    pub fn from_config(driver: Arc<dyn ArchitectDriver>, config: &ArchitectConfig) -> Self {
        Self::new(driver)
            .with_prompts(PromptBuilder::from_config(&config.provider))
            .with_timeout(config.provider.request_timeout())
    }

    /// Replaces the prompt builder.
    pub fn with_prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Replaces the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The underlying driver.
    pub fn driver(&self) -> &Arc<dyn ArchitectDriver> {
        &self.driver
    }

    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Generates an artifact set for a free-text requirement.
    ///
    /// Failures are logged and returned; nothing is retried.
    #[instrument(
        skip(self, requirements, cancel),
        fields(provider = self.driver.provider_name(), requirements_len = requirements.len())
    )]
    pub async fn generate_artifacts(
        &self,
        requirements: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<GeneratedArtifacts> {
        let request = self.prompts.generation_request(requirements);
        let result = match self.call(&request, cancel).await {
            Ok(response) => artifacts_from_response(&response),
            Err(e) => Err(e),
        };

        match &result {
            Ok(artifacts) => info!(
                files = artifacts.source_files.len(),
                nodes = artifacts.diagram.nodes.len(),
                dangling_links = artifacts.diagram.dangling_links().len(),
                "Generated architecture artifacts"
            ),
            Err(e) => error!(error = %e, kind = ?e.kind(), "Architecture generation failed"),
        }
        result
    }

    /// Answers a chat message given the prior history.
    ///
    /// Never fails: an empty answer becomes [`CHAT_EMPTY_FALLBACK`] and any
    /// error becomes [`CHAT_ERROR_FALLBACK`].
    #[instrument(
        skip(self, history, message, cancel),
        fields(provider = self.driver.provider_name(), history = history.len())
    )]
    pub async fn chat(
        &self,
        history: &[Message],
        message: &str,
        cancel: &CancellationToken,
    ) -> String {
        let request = self.prompts.chat_request(history, message);
        match self.call(&request, cancel).await {
            Ok(response) => response.text().unwrap_or_else(|| {
                warn!("Provider returned an empty chat reply");
                CHAT_EMPTY_FALLBACK.to_string()
            }),
            Err(e) => {
                error!(error = %e, kind = ?e.kind(), "Chat call failed");
                CHAT_ERROR_FALLBACK.to_string()
            }
        }
    }

    async fn call(
        &self,
        request: &GenerateRequest,
        cancel: &CancellationToken,
    ) -> ProviderResult<GenerateResponse> {
        let started = Instant::now();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProviderError::new(ProviderErrorKind::Cancelled)),
            result = tokio::time::timeout(self.timeout, self.driver.generate(request)) => {
                match result {
                    Ok(Ok(response)) => Ok(response),
                    Ok(Err(e)) => Err(provider_error(&e)),
                    Err(_) => Err(ProviderError::new(ProviderErrorKind::Timeout(
                        self.timeout.as_secs(),
                    ))),
                }
            }
        };
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = outcome.is_ok(),
            "Provider call settled"
        );
        outcome
    }
}

fn artifacts_from_response(response: &GenerateResponse) -> ProviderResult<GeneratedArtifacts> {
    if let Some(value) = response.json() {
        return artifacts_from_value(value);
    }
    match response.text() {
        Some(text) => parse_artifacts(&text),
        None => Err(ProviderError::new(ProviderErrorKind::EmptyResponse)),
    }
}

fn provider_error(err: &ArchitectError) -> ProviderError {
    match err.kind() {
        ArchitectErrorKind::Provider(e) => e.clone(),
        ArchitectErrorKind::Gemini(e) => match &e.kind {
            GeminiErrorKind::MissingApiKey(vars) => {
                ProviderError::new(ProviderErrorKind::Credential(format!("set one of {}", vars)))
            }
            _ => ProviderError::new(ProviderErrorKind::Request(e.to_string())),
        },
        _ => ProviderError::new(ProviderErrorKind::Request(err.to_string())),
    }
}
