//! Request and response types for LLM generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Declared shape of a structured response.
///
/// Providers that support constrained decoding receive the schema with the
/// request; the gateway still validates whatever comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// MIME type the provider should answer with (e.g. `application/json`)
    pub mime_type: String,
    /// Schema in the provider's structured-output dialect
    pub schema: serde_json::Value,
}

impl ResponseFormat {
    /// JSON response constrained by `schema`.
    pub fn json(schema: serde_json::Value) -> Self {
        Self {
            mime_type: "application/json".to_string(),
            schema,
        }
    }
}

/// Provider-neutral generation request.
///
/// # Examples
///
/// ```
/// use cms_architect_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .temperature(Some(0.2))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert!(request.response_format.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct GenerateRequest {
    /// The conversation messages to send, system instruction first
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
    /// Structured output contract, if any
    pub response_format: Option<ResponseFormat>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use cms_architect_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("Hello".to_string()), Output::Text(" there".to_string())],
/// };
///
/// assert_eq!(response.text().as_deref(), Some("Hello there"));
/// assert_eq!(GenerateResponse { outputs: vec![] }.text(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Concatenated text outputs, or `None` when there is no non-empty text.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                Output::Json(_) => None,
            })
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First structured JSON output, if the driver produced one.
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.outputs.iter().find_map(|output| match output {
            Output::Json(value) => Some(value),
            Output::Text(_) => None,
        })
    }
}
