//! Gemini-specific error types.

/// Gemini-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeminiErrorKind {
    /// No API key was found in the environment
    #[display("No Gemini API key set (checked {})", _0)]
    MissingApiKey(String),
    /// Failed to create the HTTP client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// The request could not be sent or the body could not be read
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// The response body was not a valid generateContent response
    #[display("Invalid Gemini response: {}", _0)]
    InvalidResponse(String),
    /// The prompt or candidate was blocked by the provider
    #[display("Gemini blocked the request: {}", _0)]
    Blocked(String),
}

/// Gemini error with source location tracking.
///
/// # Examples
///
/// ```
/// use cms_architect_error::{GeminiError, GeminiErrorKind};
///
/// let err = GeminiError::new(GeminiErrorKind::MissingApiKey("GEMINI_API_KEY".to_string()));
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gemini Error: {} at line {} in {}", kind, line, file)]
pub struct GeminiError {
    /// The kind of error that occurred
    pub kind: GeminiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeminiError {
    /// Create a new GeminiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeminiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// HTTP status code, if the provider answered with one.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            GeminiErrorKind::HttpError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
