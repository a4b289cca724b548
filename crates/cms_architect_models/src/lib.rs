//! LLM provider integrations for CMS Architect.
//!
//! Each provider lives behind its own feature flag.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) - Enable with `gemini` feature (default)
//!
//! # Example
//!
//! ```no_run
//! use cms_architect_models::GeminiClient;
//! use cms_architect_interface::ArchitectDriver;
//! use cms_architect_core::{GenerateRequest, Message};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::from_env("gemini-2.5-flash")?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod metrics;

pub use metrics::{LlmMetrics, classify_error};

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{
    Candidate, Content, GeminiClient, GeminiRequest, GeminiRequestBuilder, GeminiResponse,
    GenerationConfig, GenerationConfigBuilder, Part, PromptFeedback, SystemInstruction,
    UsageMetadata,
};
