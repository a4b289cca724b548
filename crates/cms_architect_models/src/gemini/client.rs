//! Gemini REST client.

use super::conversion::{from_gemini_response, to_gemini_request};
use super::dto::{GeminiRequest, GeminiResponse};
use crate::{LlmMetrics, classify_error};
use cms_architect_config::ProviderConfig;
use cms_architect_core::{GenerateRequest, GenerateResponse};
use cms_architect_error::{ArchitectResult, GeminiError, GeminiErrorKind};
use cms_architect_interface::{ArchitectDriver, Metadata, ModelMetadata};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, instrument};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini API client.
///
/// A missing API key does not prevent construction; every call then fails
/// with [`GeminiErrorKind::MissingApiKey`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    key_vars: Vec<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key, if one is available
    /// * `model` - Model identifier (e.g., "gemini-2.5-flash")
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> ArchitectResult<Self> {
        Self::with_timeout(api_key, model, DEFAULT_TIMEOUT)
    }

    /// Creates a client whose HTTP requests give up after `timeout`.
    pub fn with_timeout(
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> ArchitectResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string()))
        })?;
        debug!(has_key = api_key.is_some(), "Creating new Gemini client");

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            key_vars: DEFAULT_KEY_VARS.iter().map(|var| var.to_string()).collect(),
            model: model.into(),
            base_url: GEMINI_API_URL.to_string(),
        })
    }

    /// Creates a client reading the key from `GEMINI_API_KEY`, then `API_KEY`.
    pub fn from_env(model: impl Into<String>) -> ArchitectResult<Self> {
        let api_key = DEFAULT_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty());
        Self::new(api_key, model)
    }

    /// Creates a client from provider configuration.
    #[instrument(skip(config), fields(model = %config.model))]
    pub fn from_config(config: &ProviderConfig) -> ArchitectResult<Self> {
        let mut client =
            Self::with_timeout(config.api_key(), &config.model, config.request_timeout())?
                .with_base_url(&config.base_url);
        if !config.api_key_vars.is_empty() {
            client.key_vars = config.api_key_vars.clone();
        }
        Ok(client)
    }

    /// Overrides the REST base URL (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Sends a request to the Gemini API.
    #[instrument(skip(self, request), fields(model = %model))]
    pub async fn generate_gemini(
        &self,
        model: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            error!("No Gemini API key configured");
            GeminiError::new(GeminiErrorKind::MissingApiKey(self.key_vars.join(", ")))
        })?;

        debug!("Sending request to Gemini API");
        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                GeminiError::new(GeminiErrorKind::ApiRequest(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read Gemini response body");
            GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                "Failed to read response: {}",
                e
            )))
        })?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Gemini API returned error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: error_message(&body),
            }));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            GeminiError::new(GeminiErrorKind::InvalidResponse(e.to_string()))
        })
    }

    async fn generate_internal(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, GeminiError> {
        let gemini_request = to_gemini_request(request)?;
        let gemini_response = self.generate_gemini(model, &gemini_request).await?;

        if let Some(usage) = gemini_response.usage_metadata() {
            debug!(
                prompt_tokens = usage.prompt_token_count(),
                completion_tokens = usage.candidates_token_count(),
                "Token usage"
            );
            LlmMetrics::get().record_tokens(
                model,
                *usage.prompt_token_count(),
                *usage.candidates_token_count(),
            );
        }

        from_gemini_response(&gemini_response)
    }
}

/// Pulls `error.message` out of a Google error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait::async_trait]
impl ArchitectDriver for GeminiClient {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(provider = "gemini"))]
    async fn generate(&self, request: &GenerateRequest) -> ArchitectResult<GenerateResponse> {
        let model = request.model.as_deref().unwrap_or(&self.model);
        let metrics = LlmMetrics::get();
        let start = Instant::now();

        match self.generate_internal(model, request).await {
            Ok(response) => {
                metrics.record_request("gemini", model, start.elapsed().as_secs_f64());
                Ok(response)
            }
            Err(e) => {
                metrics.record_error("gemini", model, classify_error(&e));
                Err(e.into())
            }
        }
    }
}

impl Metadata for GeminiClient {
    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            provider: "gemini",
            model: self.model.clone(),
            max_input_tokens: 1_048_576,
            max_output_tokens: 65_536,
            supports_json_mode: true,
            supports_system_instruction: true,
        }
    }
}
