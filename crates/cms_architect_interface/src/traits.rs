//! Trait definitions for LLM backends and their capabilities.

use crate::ModelMetadata;
use async_trait::async_trait;
use cms_architect_core::{GenerateRequest, GenerateResponse};
use cms_architect_error::ArchitectResult;

/// Core trait that every provider backend implements.
///
/// One call, one complete response: no streaming and no partial delivery.
#[async_trait]
pub trait ArchitectDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> ArchitectResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier used when the request does not name one.
    fn model_name(&self) -> &str;
}

/// Trait for querying model metadata and capabilities.
pub trait Metadata: ArchitectDriver {
    /// Get metadata about this model.
    fn metadata(&self) -> ModelMetadata;

    /// Whether the backend can constrain output to a declared JSON schema.
    fn supports_structured_output(&self) -> bool {
        self.metadata().supports_json_mode
    }
}
