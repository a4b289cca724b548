//! Gemini `generateContent` data transfer objects.

use cms_architect_interface::FinishReason;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single content part. Only text parts are used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Part text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Set on reasoning parts that are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

impl Part {
    /// Text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }

    /// Answer text of this part, skipping reasoning parts.
    pub fn answer_text(&self) -> Option<&str> {
        match self.thought {
            Some(true) => None,
            _ => self.text.as_deref(),
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Content {
    /// "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    /// Content with a role and parts.
    pub fn new(role: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role.into()),
            parts,
        }
    }

    /// Append a part to this turn.
    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }
}

/// System instruction carried outside the turn list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct SystemInstruction {
    /// Instruction parts
    parts: Vec<Part>,
}

impl SystemInstruction {
    /// Instruction made of a single text part.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::from_text(text)],
        }
    }
}

/// Sampling and output-format settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(default, setter(into))]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// MIME type of the answer (e.g. `application/json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    /// OpenAPI-subset schema the answer must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Output token limit
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Creates a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Whether no field is set, in which case it is omitted from the request.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    contents: Vec<Content>,
    /// System instruction
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    /// Generation settings
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GeminiRequest {
    /// Creates a new builder for `GeminiRequest`.
    pub fn builder() -> GeminiRequestBuilder {
        GeminiRequestBuilder::default()
    }
}

/// A generated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content; absent when the candidate was blocked
    #[serde(default)]
    content: Option<Content>,
    /// Raw finish reason (e.g. "STOP", "MAX_TOKENS", "SAFETY")
    #[serde(default)]
    finish_reason: Option<String>,
}

impl Candidate {
    /// Finish reason mapped onto the provider-neutral enum.
    pub fn finish(&self) -> Option<FinishReason> {
        self.finish_reason.as_deref().map(|reason| match reason {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::Length,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
                FinishReason::ContentFilter
            }
            _ => FinishReason::Other,
        })
    }

    /// Concatenated answer text of this candidate.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(Part::answer_text)
            .collect()
    }
}

/// Feedback on the prompt itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was blocked
    #[serde(default)]
    block_reason: Option<String>,
}

/// Token accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt
    #[serde(default)]
    prompt_token_count: u64,
    /// Tokens across all candidates
    #[serde(default)]
    candidates_token_count: u64,
    /// Total tokens
    #[serde(default)]
    total_token_count: u64,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Candidates, usually one
    #[serde(default)]
    candidates: Vec<Candidate>,
    /// Prompt feedback
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    /// Token usage
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}
