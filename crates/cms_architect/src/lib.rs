//! CMS Architect - Course Management System architecture generator
//!
//! Describe a Course Management System in plain language and CMS Architect
//! asks Google Gemini for a complete starting point: a MySQL schema with
//! role-based access control, Spring Boot source files, and an entity diagram.
//!
//! # Features
//!
//! - **Structured generation**: One call, one validated artifact set
//! - **Conversational help**: Ask follow-up questions about the generated design
//! - **Terminal UI**: Chat, schema, code and preview tabs
//! - **Layered configuration**: Bundled defaults, user and project files, environment
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cms_architect::{GeminiClient, ResponseGateway};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::from_env("gemini-2.5-flash")?;
//!     let gateway = ResponseGateway::new(Arc::new(client));
//!
//!     let artifacts = gateway
//!         .generate_artifacts("A university with labs and TAs", &CancellationToken::new())
//!         .await?;
//!     println!("{}", artifacts.schema);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! CMS Architect is organized as a workspace with focused crates:
//!
//! - `cms_architect_error` - Error types
//! - `cms_architect_core` - Core data types (messages, requests, artifacts)
//! - `cms_architect_interface` - ArchitectDriver trait definition
//! - `cms_architect_config` - Layered configuration
//! - `cms_architect_models` - Gemini driver
//! - `cms_architect_gateway` - Prompt builder, response gateway, session
//! - `cms_architect_tui` - Terminal UI
//!
//! This crate (`cms_architect`) re-exports everything for convenience.

pub mod cli;
pub mod observability;

pub use cms_architect_config::{
    ArchitectConfig, LoggingConfig, ProviderConfig, SessionConfig, TuiConfig,
};
pub use cms_architect_core::*;
pub use cms_architect_error::*;
pub use cms_architect_gateway::*;
pub use cms_architect_interface::*;
pub use cms_architect_models::{GeminiClient, LlmMetrics};
pub use cms_architect_tui::{App, Tab, run_tui};
