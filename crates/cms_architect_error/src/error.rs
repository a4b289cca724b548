//! Top-level error wrapper types.

use crate::{ConfigError, GeminiError, JsonError, ProviderError};
#[cfg(feature = "tui")]
use crate::TuiError;

/// Every error the workspace can produce.
///
/// # Examples
///
/// ```
/// use cms_architect_error::{ArchitectError, JsonError};
///
/// let json_err = JsonError::new("expected value at line 1");
/// let err: ArchitectError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ArchitectErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gemini driver error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Provider call failure surfaced by the response gateway
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Terminal UI error
    #[cfg(feature = "tui")]
    #[from(TuiError)]
    Tui(TuiError),
}

/// CMS Architect error with kind discrimination.
///
/// # Examples
///
/// ```
/// use cms_architect_error::{ArchitectErrorKind, ArchitectResult, ConfigError};
///
/// fn might_fail() -> ArchitectResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), ArchitectErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("CMS Architect Error: {}", _0)]
pub struct ArchitectError(Box<ArchitectErrorKind>);

impl ArchitectError {
    /// Create a new error from a kind.
    pub fn new(kind: ArchitectErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ArchitectErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ArchitectErrorKind
impl<T> From<T> for ArchitectError
where
    T: Into<ArchitectErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for CMS Architect operations.
pub type ArchitectResult<T> = std::result::Result<T, ArchitectError>;
