//! Output types from LLM responses.

use serde::{Deserialize, Serialize};

/// Output produced by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output (may itself contain fenced JSON).
    Text(String),

    /// Structured JSON output, already parsed by the driver.
    Json(serde_json::Value),
}
