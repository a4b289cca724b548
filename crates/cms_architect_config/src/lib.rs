//! Configuration for CMS Architect.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from cms_architect.toml)
//! - User overrides (~/.config/cms_architect/cms_architect.toml, then ./cms_architect.toml)
//! - An explicit file passed on the command line
//! - `CMS_ARCHITECT__SECTION__KEY` environment variables

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{ArchitectConfig, LoggingConfig, ProviderConfig, SessionConfig, TuiConfig};
