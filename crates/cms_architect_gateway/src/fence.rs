//! Markdown fence removal.

const OPENING_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Strips a "```json" ... "```" fence around a JSON payload.
///
/// The payload runs from just after the first "```json" marker to the last
/// "```" marker. Without a closing marker only the opening one is removed.
/// Text without an opening marker is returned unchanged.
///
/// # Examples
///
/// ```
/// use cms_architect_gateway::strip_json_fence;
///
/// assert_eq!(strip_json_fence("```json\n{\"schema\": \"\"}\n```"), "{\"schema\": \"\"}");
/// assert_eq!(strip_json_fence("{\"schema\": \"\"}"), "{\"schema\": \"\"}");
/// ```
pub fn strip_json_fence(text: &str) -> &str {
    let Some(start) = text.find(OPENING_FENCE) else {
        return text;
    };
    let body_start = start + OPENING_FENCE.len();

    match text.rfind(FENCE) {
        Some(end) if end >= body_start => text[body_start..end].trim(),
        _ => text[body_start..].trim(),
    }
}
