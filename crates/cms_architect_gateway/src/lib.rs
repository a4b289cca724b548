//! Prompt builder, response gateway and session state for CMS Architect.
//!
//! The gateway is the only place that talks to a provider driver. It turns a
//! free-text requirement into a structured generation request, validates
//! whatever comes back against the declared artifact shape, and collapses
//! every failure into a single [`ProviderError`](cms_architect_error::ProviderError).
//!
//! # Example
//!
//! ```no_run
//! use cms_architect_gateway::{ResponseGateway, Session};
//! use cms_architect_interface::ArchitectDriver;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(driver: Arc<dyn ArchitectDriver>) {
//! let gateway = ResponseGateway::new(driver);
//! let mut session = Session::new(Some(40));
//!
//! session
//!     .submit(&gateway, "Build a CMS for a coding bootcamp", &CancellationToken::new())
//!     .await;
//!
//! println!("{} source files", session.artifacts().source_files.len());
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fence;
mod gateway;
mod intent;
mod prompt;
mod session;
mod validate;

pub use fence::strip_json_fence;
pub use gateway::{CHAT_EMPTY_FALLBACK, CHAT_ERROR_FALLBACK, ResponseGateway};
pub use intent::{Intent, IntentClassifier, KeywordClassifier, route};
pub use prompt::{CHAT_SYSTEM_INSTRUCTION, PromptBuilder, artifact_response_schema};
pub use session::{
    GENERATION_CANCELLED_NOTICE, GENERATION_ERROR_NOTICE, GENERATION_PROGRESS_NOTICE,
    GENERATION_SUCCESS_NOTICE, GREETING, Session, Turn, TurnOutcome,
};
pub use validate::{artifacts_from_value, parse_artifacts};
