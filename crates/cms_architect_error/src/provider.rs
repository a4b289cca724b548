//! Provider call failures as seen by the response gateway.
//!
//! Every way a generation call can go wrong collapses into [`ProviderError`].
//! The kind exists for diagnostics and logging; callers treat all kinds alike.

/// Why a provider call failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// No credential is available for the provider
    #[display("Provider credential missing: {}", _0)]
    Credential(String),
    /// The driver failed: network, credentials, HTTP status, refusal
    #[display("Provider request failed: {}", _0)]
    Request(String),
    /// The provider answered without any text
    #[display("Provider returned no text")]
    EmptyResponse,
    /// The returned text is not valid JSON
    #[display("Provider returned malformed JSON: {}", _0)]
    Malformed(String),
    /// The JSON does not match the declared response shape
    #[display("Response shape mismatch at '{}': expected {}", path, expected)]
    Shape {
        /// JSON path of the offending value (e.g. `sourceFiles[2].kind`)
        path: String,
        /// What the declared shape requires at that path
        expected: String,
    },
    /// The call did not settle within the configured timeout
    #[display("Provider call timed out after {}s", _0)]
    Timeout(u64),
    /// The call was cancelled before it settled
    #[display("Provider call was cancelled")]
    Cancelled,
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use cms_architect_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::EmptyResponse);
/// assert_eq!(err.kind(), &ProviderErrorKind::EmptyResponse);
/// assert!(format!("{}", err).contains("no text"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    line: u32,
    file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ProviderErrorKind {
        &self.kind
    }

    /// Shorthand for a [`ProviderErrorKind::Shape`] error.
    #[track_caller]
    pub fn shape(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Shape {
            path: path.into(),
            expected: expected.into(),
        })
    }
}

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;
