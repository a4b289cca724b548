//! Error types for CMS Architect.
//!
//! This crate provides the foundation error types used throughout the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use cms_architect_error::{ArchitectResult, ConfigError};
//!
//! fn load() -> ArchitectResult<String> {
//!     Err(ConfigError::new("model must not be empty"))?
//! }
//!
//! match load() {
//!     Ok(model) => println!("Model: {}", model),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod json;
mod provider;
#[cfg(feature = "tui")]
mod tui;

pub use config::ConfigError;
pub use error::{ArchitectError, ArchitectErrorKind, ArchitectResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use json::JsonError;
pub use provider::{ProviderError, ProviderErrorKind, ProviderResult};
#[cfg(feature = "tui")]
pub use tui::{TuiError, TuiErrorKind, TuiResult};
