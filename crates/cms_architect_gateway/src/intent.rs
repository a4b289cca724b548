//! Request routing between generation and chat.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

const GENERATE_DIRECTIVE: &str = "/generate";
const CHAT_DIRECTIVE: &str = "/chat";

static GENERATION_KEYWORDS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)build|create|generate|make|system|code").ok());

/// What a user message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Intent {
    /// Produce a new artifact set
    #[display("generate")]
    Generate,
    /// Answer conversationally
    #[display("chat")]
    Chat,
}

/// Decides the intent of a free-text message.
pub trait IntentClassifier: Send + Sync {
    /// Classify `text`.
    fn classify(&self, text: &str) -> Intent;
}

/// Keyword heuristic: any of `build`, `create`, `generate`, `make`, `system`
/// or `code` anywhere in the text, ignoring case, means generation.
///
/// Matching is by substring: "systematic" and "remake" also match.
///
/// # Examples
///
/// ```
/// use cms_architect_gateway::{Intent, IntentClassifier, KeywordClassifier};
///
/// let classifier = KeywordClassifier;
/// assert_eq!(classifier.classify("Build a CMS for a bootcamp"), Intent::Generate);
/// assert_eq!(classifier.classify("What does RBAC mean?"), Intent::Chat);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Intent {
        match GENERATION_KEYWORDS.as_ref() {
            Some(keywords) if keywords.is_match(text) => Intent::Generate,
            _ => Intent::Chat,
        }
    }
}

/// Routes a message, honoring `/generate` and `/chat` directives.
///
/// A directive wins over the classifier and is removed from the returned
/// text. Without a directive the text is returned unchanged.
///
/// # Examples
///
/// ```
/// use cms_architect_gateway::{Intent, KeywordClassifier, route};
///
/// assert_eq!(route(&KeywordClassifier, "/chat how do I build the jar?"),
///            (Intent::Chat, "how do I build the jar?"));
/// assert_eq!(route(&KeywordClassifier, "/generate an LMS for nurses"),
///            (Intent::Generate, "an LMS for nurses"));
/// ```
pub fn route<'a>(classifier: &dyn IntentClassifier, text: &'a str) -> (Intent, &'a str) {
    let trimmed = text.trim_start();
    for (directive, intent) in [
        (GENERATE_DIRECTIVE, Intent::Generate),
        (CHAT_DIRECTIVE, Intent::Chat),
    ] {
        if let Some(rest) = strip_directive(trimmed, directive) {
            debug!(%intent, "Routed by directive");
            return (intent, rest);
        }
    }

    let intent = classifier.classify(text);
    debug!(%intent, "Routed by classifier");
    (intent, text)
}

fn strip_directive<'a>(text: &'a str, directive: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(directive)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest.trim_start()),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_match_anywhere_ignoring_case() {
        let classifier = KeywordClassifier;
        for text in [
            "CREATE an LMS",
            "I need a SYSTEM for tutors",
            "show me the code",
            "can you make it multi-tenant",
            "systematic review of courses",
        ] {
            assert_eq!(classifier.classify(text), Intent::Generate, "{text}");
        }
        for text in ["What does RBAC mean?", "Explain @PreAuthorize", ""] {
            assert_eq!(classifier.classify(text), Intent::Chat, "{text}");
        }
    }

    #[test]
    fn directive_needs_word_boundary() {
        let (intent, text) = route(&KeywordClassifier, "/chatty question");
        assert_eq!(intent, Intent::Chat);
        assert_eq!(text, "/chatty question");

        let (intent, text) = route(&KeywordClassifier, "/generatesomething");
        assert_eq!(intent, Intent::Generate);
        assert_eq!(text, "/generatesomething");
    }

    #[test]
    fn bare_directive_leaves_empty_text() {
        assert_eq!(route(&KeywordClassifier, "/generate"), (Intent::Generate, ""));
    }
}
