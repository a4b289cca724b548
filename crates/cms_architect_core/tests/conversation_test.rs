use cms_architect_core::{Conversation, GenerateRequest, Message, MessageBuilder, Role};

#[test]
fn messages_keep_chronological_order() {
    let mut conversation = Conversation::new(None);
    conversation.push(Message::assistant("Hello"));
    conversation.push(Message::user("Build a CMS"));
    conversation.push(Message::assistant("Done"));

    let roles: Vec<Role> = conversation.messages().iter().map(|m| *m.role()).collect();
    assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
    assert_eq!(conversation.last().map(|m| m.text().as_str()), Some("Done"));
}

#[test]
fn system_messages_are_not_history() {
    let mut conversation = Conversation::new(None);
    conversation.push(Message::system("You are an architect"));
    assert!(conversation.is_empty());
}

#[test]
fn forwarded_history_keeps_most_recent_messages() {
    let mut conversation = Conversation::new(Some(3));
    for i in 0..5 {
        conversation.push(Message::user(format!("message {i}")));
    }

    let forwarded: Vec<&str> = conversation
        .forwarded_history()
        .iter()
        .map(|m| m.text().as_str())
        .collect();
    assert_eq!(forwarded, vec!["message 2", "message 3", "message 4"]);
    assert_eq!(conversation.len(), 5);
}

#[test]
fn uncapped_history_forwards_everything() {
    let mut conversation = Conversation::new(None);
    for i in 0..50 {
        conversation.push(Message::user(format!("message {i}")));
    }
    assert_eq!(conversation.forwarded_history().len(), 50);
}

#[test]
fn builders_produce_expected_values() -> anyhow::Result<()> {
    let message = MessageBuilder::default()
        .role(Role::User)
        .text("What does RBAC mean?")
        .build()?;
    assert_eq!(message, Message::user("What does RBAC mean?"));

    let request = GenerateRequest::builder()
        .messages(vec![message])
        .max_tokens(Some(256))
        .model(Some("gemini-2.5-flash".to_string()))
        .build()?;
    assert_eq!(request.max_tokens, Some(256));
    assert_eq!(request.temperature, None);
    assert!(request.response_format.is_none());
    Ok(())
}
