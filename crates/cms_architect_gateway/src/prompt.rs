//! Generation prompt and request construction.

use cms_architect_config::ProviderConfig;
use cms_architect_core::{GenerateRequest, Message, ResponseFormat, SourceFileKind};
use serde_json::{Value, json};

/// System instruction for the conversational path.
pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are a helpful Java & MySQL Architect assistant \
specific to Course Management Systems. When asked about security, explain how Spring Security \
and RBAC work with the generated schema. Keep answers concise.";

const GENERATION_TEMPLATE: &str = r#"You are a Senior Software Architect specializing in Java Spring Boot and MySQL.
The user wants to build a Course Management System (CMS).

User Requirements: "{requirements}"

MANDATORY ARCHITECTURE REQUIREMENTS:
1. Role-Based Access Control (RBAC):
   - Design a robust permission system with at least three roles: 'ADMIN', 'INSTRUCTOR', 'STUDENT'.
   - MySQL: Must include 'users', 'roles', and 'user_roles' (many-to-many) tables.
   - Java: Include proper Entity relationships for Users and Roles.

2. Core CMS Features:
   - Standard entities: Courses, Enrollments, Grades/Submissions.

Generate the following 3 things in a single JSON response:
1. "schema": A complete MySQL CREATE TABLE script including foreign keys and initial seed data for roles.
2. "sourceFiles": An array of at least 5 essential Java files, each with "name", "content" and "kind" ({kinds}). MUST include:
   - User.java (Entity)
   - Role.java (Entity)
   - SecurityConfig.java (Spring Security Configuration)
   - CourseController.java (With @PreAuthorize annotations for roles)
   - CourseRepository.java
3. "diagram": A simple node/link structure for visualization, with "nodes" ({"id", "label"}) and "links" ({"source", "target"}).

Constraint for Java: Use Spring Boot 3.x annotations (@Entity, @RestController, @PreAuthorize, @ManyToMany)."#;

/// Response schema for generation calls, in Gemini's `responseSchema` dialect.
///
/// # Examples
///
/// ```
/// use cms_architect_gateway::artifact_response_schema;
///
/// let schema = artifact_response_schema();
/// assert_eq!(schema["properties"]["sourceFiles"]["type"], "ARRAY");
/// assert_eq!(
///     schema["properties"]["sourceFiles"]["items"]["properties"]["kind"]["enum"][4],
///     "config"
/// );
/// ```
pub fn artifact_response_schema() -> Value {
    let pair = |first: &str, second: &str| {
        json!({
            "type": "OBJECT",
            "properties": {
                first: {"type": "STRING"},
                second: {"type": "STRING"}
            },
            "required": [first, second]
        })
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "schema": {"type": "STRING", "description": "The MySQL SQL script"},
            "sourceFiles": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "content": {"type": "STRING"},
                        "kind": {"type": "STRING", "enum": SourceFileKind::wire_names()}
                    },
                    "required": ["name", "content", "kind"]
                }
            },
            "diagram": {
                "type": "OBJECT",
                "properties": {
                    "nodes": {"type": "ARRAY", "items": pair("id", "label")},
                    "links": {"type": "ARRAY", "items": pair("source", "target")}
                }
            }
        }
    })
}

/// Builds provider requests for both call paths.
///
/// Building is pure: the same inputs always produce the same request.
///
/// # Examples
///
/// ```
/// use cms_architect_gateway::PromptBuilder;
///
/// let request = PromptBuilder::default().generation_request("A bootcamp with mentors");
/// let prompt = request.messages[0].text();
///
/// assert!(prompt.contains("A bootcamp with mentors"));
/// assert!(prompt.contains("user_roles"));
/// assert!(request.response_format.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl PromptBuilder {
    /// Builder using the sampling overrides from provider configuration.
    ///
    /// The model is left to the driver's default.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            model: None,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Pins every request to `model`.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Full generation prompt with the requirement interpolated verbatim.
    pub fn generation_prompt(&self, requirements: &str) -> String {
        GENERATION_TEMPLATE
            .replace("{kinds}", &SourceFileKind::wire_names().join(", "))
            .replace("{requirements}", requirements)
    }

    /// Structured generation request for a free-text requirement.
    pub fn generation_request(&self, requirements: &str) -> GenerateRequest {
        GenerateRequest {
            messages: vec![Message::user(self.generation_prompt(requirements))],
            max_tokens: self.max_output_tokens,
            temperature: self.temperature,
            model: self.model.clone(),
            response_format: Some(ResponseFormat::json(artifact_response_schema())),
        }
    }

    /// Conversational request: system instruction, prior history, new message.
    pub fn chat_request(&self, history: &[Message], message: &str) -> GenerateRequest {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(CHAT_SYSTEM_INSTRUCTION));
        messages.extend(history.iter().cloned());
        messages.push(Message::user(message));

        GenerateRequest {
            messages,
            max_tokens: self.max_output_tokens,
            temperature: self.temperature,
            model: self.model.clone(),
            response_format: None,
        }
    }
}
