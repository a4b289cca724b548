//! Trait definitions for CMS Architect provider drivers.
//!
//! The response gateway talks to the generative text service only through
//! [`ArchitectDriver`], so tests can substitute a stub provider.

mod traits;
mod types;

pub use traits::{ArchitectDriver, Metadata};
pub use types::{FinishReason, ModelMetadata};
