//! Conversions between provider-neutral and Gemini types.

use super::dto::{
    Content, GeminiRequest, GeminiResponse, GenerationConfig, Part, SystemInstruction,
};
use cms_architect_core::{GenerateRequest, GenerateResponse, Output, Role};
use cms_architect_error::{GeminiError, GeminiErrorKind};
use cms_architect_interface::FinishReason;
use tracing::{debug, instrument};

fn gemini_role(role: &Role) -> Option<&'static str> {
    match role {
        Role::User => Some("user"),
        Role::Assistant => Some("model"),
        Role::System => None,
    }
}

/// Builds a `generateContent` body.
///
/// System messages become the system instruction. Consecutive turns with the
/// same role are merged, since Gemini expects user and model turns to
/// alternate.
#[instrument(skip(request), fields(messages = request.messages.len()))]
pub(crate) fn to_gemini_request(request: &GenerateRequest) -> Result<GeminiRequest, GeminiError> {
    let mut system = Vec::new();
    let mut contents: Vec<Content> = Vec::new();

    for message in &request.messages {
        let Some(role) = gemini_role(message.role()) else {
            system.push(message.text().as_str());
            continue;
        };

        match contents.last_mut() {
            Some(last) if last.role().as_deref() == Some(role) => {
                debug!(role, "Merging consecutive turn");
                last.push(Part::from_text(message.text()));
            }
            _ => contents.push(Content::new(role, vec![Part::from_text(message.text())])),
        }
    }

    if contents.is_empty() {
        return Err(GeminiError::new(GeminiErrorKind::ApiRequest(
            "Request contains no user or model turns".to_string(),
        )));
    }

    let mut config = GenerationConfig::builder();
    if let Some(temperature) = request.temperature {
        config.temperature(temperature);
    }
    if let Some(max_tokens) = request.max_tokens {
        config.max_output_tokens(max_tokens);
    }
    if let Some(format) = &request.response_format {
        config
            .response_mime_type(format.mime_type.clone())
            .response_schema(format.schema.clone());
    }
    let config = config
        .build()
        .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

    let mut builder = GeminiRequest::builder();
    builder.contents(contents);
    if !system.is_empty() {
        builder.system_instruction(SystemInstruction::new(system.join("\n\n")));
    }
    if !config.is_empty() {
        builder.generation_config(config);
    }

    builder
        .build()
        .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))
}

/// Extracts the first candidate's answer text.
///
/// A blocked prompt or a filtered candidate without text is an error; any
/// other empty answer yields a response with no outputs.
#[instrument(skip(response), fields(candidates = response.candidates().len()))]
pub(crate) fn from_gemini_response(
    response: &GeminiResponse,
) -> Result<GenerateResponse, GeminiError> {
    let Some(candidate) = response.candidates().first() else {
        if let Some(reason) = response
            .prompt_feedback()
            .as_ref()
            .and_then(|feedback| feedback.block_reason().clone())
        {
            return Err(GeminiError::new(GeminiErrorKind::Blocked(reason)));
        }
        debug!("Response has no candidates");
        return Ok(GenerateResponse::default());
    };

    let text = candidate.text();
    if text.trim().is_empty() {
        if candidate.finish() == Some(FinishReason::ContentFilter) {
            let reason = candidate.finish_reason().clone().unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::Blocked(reason)));
        }
        debug!(finish_reason = ?candidate.finish_reason(), "Candidate has no text");
        return Ok(GenerateResponse::default());
    }

    Ok(GenerateResponse {
        outputs: vec![Output::Text(text)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_architect_core::{Message, ResponseFormat};
    use serde_json::json;

    #[test]
    fn system_messages_become_instruction() {
        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system("Be concise."),
                Message::user("Hello"),
            ])
            .build()
            .unwrap();

        let body = serde_json::to_value(to_gemini_request(&request).unwrap()).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be concise.");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["role"], "user");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn consecutive_turns_are_merged() {
        let request = GenerateRequest::builder()
            .messages(vec![
                Message::assistant("Hello! I'm your CMS Architect."),
                Message::user("Build a school system"),
                Message::user("What about grades?"),
                Message::assistant("Grades live in the submissions table."),
            ])
            .build()
            .unwrap();

        let body = serde_json::to_value(to_gemini_request(&request).unwrap()).unwrap();
        let contents = body["contents"].as_array().unwrap();

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "model");
        assert_eq!(contents[1]["role"], "user");
        assert_eq!(contents[1]["parts"].as_array().unwrap().len(), 2);
        assert_eq!(contents[2]["role"], "model");
    }

    #[test]
    fn response_format_sets_schema() {
        let request = GenerateRequest::builder()
            .messages(vec![Message::user("Build it")])
            .response_format(Some(ResponseFormat::json(json!({"type": "OBJECT"}))))
            .temperature(Some(0.4))
            .build()
            .unwrap();

        let body = serde_json::to_value(to_gemini_request(&request).unwrap()).unwrap();
        let config = &body["generationConfig"];

        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert!(config["temperature"].is_number());
        assert!(config.get("maxOutputTokens").is_none());
    }

    #[test]
    fn request_without_turns_is_rejected() {
        let request = GenerateRequest::builder()
            .messages(vec![Message::system("Only an instruction")])
            .build()
            .unwrap();

        let err = to_gemini_request(&request).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::ApiRequest(_)));
    }

    #[test]
    fn response_text_skips_thoughts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "{\"schema\":"},
                    {"text": "\"x\"}"}
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let converted = from_gemini_response(&response).unwrap();
        assert_eq!(converted.text().as_deref(), Some("{\"schema\":\"x\"}"));
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        let err = from_gemini_response(&response).unwrap_err();
        assert_eq!(err.kind, GeminiErrorKind::Blocked("SAFETY".to_string()));
    }

    #[test]
    fn filtered_candidate_is_an_error() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "RECITATION"}]
        }))
        .unwrap();

        let err = from_gemini_response(&response).unwrap_err();
        assert_eq!(err.kind, GeminiErrorKind::Blocked("RECITATION".to_string()));
    }

    #[test]
    fn empty_candidate_yields_no_outputs() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "  "}]}, "finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();

        let converted = from_gemini_response(&response).unwrap();
        assert!(converted.outputs.is_empty());
        assert_eq!(converted.text(), None);
    }
}
