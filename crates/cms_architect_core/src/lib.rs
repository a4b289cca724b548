//! Core data types for the CMS Architect generator.
//!
//! This crate provides the data model shared by the provider drivers, the
//! response gateway and the terminal UI.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifacts;
mod conversation;
mod message;
mod output;
mod request;
mod role;

pub use artifacts::{Diagram, DiagramLink, DiagramNode, GeneratedArtifacts, SourceFile, SourceFileKind};
pub use conversation::Conversation;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, ResponseFormat};
pub use role::Role;
