//! Metrics for LLM API calls.
//!
//! Provides OpenTelemetry-based metrics for tracking provider latency,
//! errors, and token usage. Instruments are no-ops until the binary installs
//! a meter provider.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for LLM API interactions, labeled by provider and model.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total LLM API requests
    pub requests: Counter<u64>,
    /// Failed LLM API requests
    pub errors: Counter<u64>,
    /// LLM API call duration in seconds
    pub duration: Histogram<f64>,
    /// Prompt tokens used
    pub prompt_tokens: Counter<u64>,
    /// Completion tokens used
    pub completion_tokens: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("cms_architect_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total LLM API requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed LLM API requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("s")
                .with_description("LLM API call duration")
                .build(),
            prompt_tokens: meter
                .u64_counter("llm.tokens.prompt")
                .with_description("Prompt tokens used")
                .build(),
            completion_tokens: meter
                .u64_counter("llm.tokens.completion")
                .with_description("Completion tokens used")
                .build(),
        }
    }

    /// Get the global LLM metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful LLM API request.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed LLM API request.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record token usage from an LLM response.
    pub fn record_tokens(&self, model: &str, prompt_tokens: u64, completion_tokens: u64) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.prompt_tokens.add(prompt_tokens, labels);
        self.completion_tokens.add(completion_tokens, labels);
    }
}

/// Classify error type for metrics labeling.
///
/// Returns one of: "rate_limit", "auth", "network", "timeout", "invalid_request", "unknown"
///
/// # Examples
///
/// ```
/// use cms_architect_models::classify_error;
///
/// let err = std::io::Error::other("HTTP 429 error: quota exceeded");
/// assert_eq!(classify_error(&err), "rate_limit");
/// ```
pub fn classify_error(error: &dyn std::error::Error) -> &'static str {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("rate limit") || error_str.contains("429") {
        "rate_limit"
    } else if error_str.contains("api key")
        || error_str.contains("401")
        || error_str.contains("403")
    {
        "auth"
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        "timeout"
    } else if error_str.contains("network")
        || error_str.contains("connection")
        || error_str.contains("dns")
    {
        "network"
    } else if error_str.contains("400") || error_str.contains("invalid") {
        "invalid_request"
    } else {
        "unknown"
    }
}
