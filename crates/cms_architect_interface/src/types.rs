//! Core type definitions for the driver interface.

use serde::{Deserialize, Serialize};

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FinishReason {
    /// Model completed naturally.
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered.
    ContentFilter,
    /// Other/unknown reason.
    Other,
}

/// Information about model capabilities and limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    /// Provider name (e.g., "gemini")
    pub provider: &'static str,
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Maximum input context tokens
    pub max_input_tokens: usize,
    /// Maximum output tokens per request
    pub max_output_tokens: usize,
    /// Supports structured JSON output mode
    pub supports_json_mode: bool,
    /// Supports a separate system instruction
    pub supports_system_instruction: bool,
}
