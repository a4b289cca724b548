//! Google Gemini REST integration.
//!
//! Talks to the `generateContent` endpoint directly so that structured output
//! (`responseSchema`) and base URL overrides are available.

mod client;
mod conversion;
mod dto;

pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, GeminiRequest, GeminiRequestBuilder, GeminiResponse, GenerationConfig,
    GenerationConfigBuilder, Part, PromptFeedback, SystemInstruction, UsageMetadata,
};
