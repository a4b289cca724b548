//! Session and end-to-end tests.

mod test_utils;

use cms_architect_core::{GeneratedArtifacts, Role, SourceFileKind};
use cms_architect_error::GeminiErrorKind;
use cms_architect_gateway::{
    GENERATION_CANCELLED_NOTICE, GENERATION_ERROR_NOTICE, GENERATION_PROGRESS_NOTICE,
    GENERATION_SUCCESS_NOTICE, GREETING, Intent, IntentClassifier, KeywordClassifier,
    ResponseGateway, Session, TurnOutcome,
    parse_artifacts, strip_json_fence,
};
use std::sync::Arc;
use test_utils::{MockBehavior, MockDriver, MockResponse, fenced, sample_artifacts_json};
use tokio_util::sync::CancellationToken;

fn texts(session: &Session) -> Vec<&str> {
    session
        .conversation()
        .messages()
        .iter()
        .map(|message| message.text().as_str())
        .collect()
}

#[test]
fn parse_is_idempotent() -> anyhow::Result<()> {
    let first = parse_artifacts(&sample_artifacts_json().to_string())?;
    let second = parse_artifacts(&serde_json::to_string(&first)?)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn fenced_and_bare_payloads_parse_alike() -> anyhow::Result<()> {
    let payload = sample_artifacts_json().to_string();

    assert_eq!(strip_json_fence(&fenced(&payload)), payload);
    assert_eq!(parse_artifacts(&fenced(&payload))?, parse_artifacts(&payload)?);
    Ok(())
}

#[test]
fn heuristic_classifies_examples() {
    assert_eq!(KeywordClassifier.classify("Build a CMS for a bootcamp"), Intent::Generate);
    assert_eq!(KeywordClassifier.classify("What does RBAC mean?"), Intent::Chat);
}

#[test]
fn new_session_is_empty_with_greeting() {
    let session = Session::new(Some(40));

    assert!(session.artifacts().is_empty());
    assert_eq!(texts(&session), vec![GREETING]);
    assert_eq!(*session.conversation().messages()[0].role(), Role::Assistant);
}

#[test]
fn blank_input_is_rejected() {
    let mut session = Session::default();

    assert!(session.begin_turn("   \n").is_none());
    assert!(!session.is_busy());
    assert_eq!(session.conversation().len(), 1);
}

#[test]
fn generation_turn_appends_progress_notice() {
    let mut session = Session::default();

    let turn = session.begin_turn("Create a CMS for a coding school").unwrap();

    assert_eq!(turn.intent, Intent::Generate);
    assert_eq!(turn.history.len(), 1);
    assert_eq!(
        texts(&session),
        vec![GREETING, "Create a CMS for a coding school", GENERATION_PROGRESS_NOTICE]
    );
}

#[test]
fn directive_overrides_heuristic() {
    let mut session = Session::default();

    let turn = session.begin_turn("/chat how should I build the login page?").unwrap();

    assert_eq!(turn.intent, Intent::Chat);
    assert_eq!(turn.text, "how should I build the login page?");
}

#[test]
fn custom_classifier_is_used() {
    struct AlwaysChat;
    impl IntentClassifier for AlwaysChat {
        fn classify(&self, _text: &str) -> Intent {
            Intent::Chat
        }
    }

    let mut session = Session::default().with_classifier(AlwaysChat);
    let turn = session.begin_turn("Build everything").unwrap();

    assert_eq!(turn.intent, Intent::Chat);
}

#[test]
fn chat_history_is_capped_and_excludes_new_message() {
    let mut session = Session::new(Some(2));
    for question in ["first?", "second?", "third?"] {
        session.begin_turn(question).unwrap();
        session.complete(TurnOutcome::Replied("answer".to_string()));
    }

    let turn = session.begin_turn("fourth?").unwrap();

    let history: Vec<&str> = turn.history.iter().map(|m| m.text().as_str()).collect();
    assert_eq!(history, vec!["third?", "answer"]);
    assert_eq!(session.conversation().len(), 8);
}

#[tokio::test]
async fn failed_generation_keeps_previous_artifacts() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new(MockBehavior::Sequence(vec![
        MockResponse::Success(sample_artifacts_json().to_string()),
        MockResponse::Error(GeminiErrorKind::HttpError {
            status_code: 500,
            message: "internal".to_string(),
        }),
        MockResponse::Success("not json at all".to_string()),
    ])));
    let gateway = ResponseGateway::new(driver.clone());
    let cancel = CancellationToken::new();
    let mut session = Session::default();

    assert!(session.submit(&gateway, "Build a university system", &cancel).await);
    let before: GeneratedArtifacts = session.artifacts().clone();
    assert!(!before.is_empty());

    assert!(session.submit(&gateway, "Build it again", &cancel).await);
    assert_eq!(session.artifacts(), &before);
    assert_eq!(session.conversation().last().map(|m| m.text().as_str()), Some(GENERATION_ERROR_NOTICE));

    assert!(session.submit(&gateway, "Generate a smaller one", &cancel).await);
    assert_eq!(session.artifacts(), &before);
    assert!(!session.is_busy());
    Ok(())
}

#[tokio::test]
async fn cancelled_generation_reports_cancellation() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new(MockBehavior::Hang));
    let gateway = ResponseGateway::new(driver.clone());
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut session = Session::default();

    assert!(session.submit(&gateway, "Build a university system", &cancel).await);

    assert!(session.artifacts().is_empty());
    assert!(!session.is_busy());
    assert_eq!(
        session.conversation().last().map(|m| m.text().as_str()),
        Some(GENERATION_CANCELLED_NOTICE)
    );
    assert!(!texts(&session).contains(&GENERATION_ERROR_NOTICE));
    Ok(())
}

#[tokio::test]
async fn end_to_end_generation_stores_artifacts() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new_success(sample_artifacts_json().to_string()));
    let gateway = ResponseGateway::new(driver.clone());
    let mut session = Session::new(Some(40));

    let requirement = "Build a CMS for a coding bootcamp with mentors";
    assert!(session.submit(&gateway, requirement, &CancellationToken::new()).await);

    let requests = driver.requests();
    assert_eq!(requests.len(), 1);
    let prompt = requests[0].messages[0].text();
    assert!(prompt.contains(requirement));
    for constraint in ["ADMIN", "INSTRUCTOR", "STUDENT", "user_roles", "SecurityConfig.java"] {
        assert!(prompt.contains(constraint), "prompt is missing {constraint}");
    }
    assert!(requests[0].response_format.is_some());

    let artifacts = session.artifacts();
    for table in ["users", "roles", "user_roles"] {
        assert!(artifacts.schema.contains(table), "schema is missing {table}");
    }
    assert_eq!(artifacts.files_of_kind(SourceFileKind::Config).count(), 1);
    assert_eq!(artifacts.diagram.dangling_links().len(), 1);
    assert_eq!(
        texts(&session),
        vec![GREETING, requirement, GENERATION_PROGRESS_NOTICE, GENERATION_SUCCESS_NOTICE]
    );
    Ok(())
}

#[tokio::test]
async fn chat_turn_appends_reply() -> anyhow::Result<()> {
    let driver = Arc::new(MockDriver::new_success("RBAC maps users to roles."));
    let gateway = ResponseGateway::new(driver.clone());
    let mut session = Session::default();

    assert!(session.submit(&gateway, "What does RBAC mean?", &CancellationToken::new()).await);

    assert_eq!(
        texts(&session),
        vec![GREETING, "What does RBAC mean?", "RBAC maps users to roles."]
    );
    assert!(session.artifacts().is_empty());
    // system instruction, greeting, new message
    assert_eq!(driver.requests()[0].messages.len(), 3);
    Ok(())
}
