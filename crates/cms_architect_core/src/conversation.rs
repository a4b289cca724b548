//! Append-only conversation history.

use crate::{Message, Role};
use serde::{Deserialize, Serialize};

/// Chronological, append-only list of user and assistant messages.
///
/// Messages are never edited or removed. The history forwarded to the
/// provider is a window over the most recent messages, bounded by
/// `max_forwarded`.
///
/// # Examples
///
/// ```
/// use cms_architect_core::{Conversation, Message};
///
/// let mut conversation = Conversation::new(Some(2));
/// conversation.push(Message::assistant("Hello!"));
/// conversation.push(Message::user("What is RBAC?"));
/// conversation.push(Message::assistant("Role-based access control."));
///
/// assert_eq!(conversation.len(), 3);
/// assert_eq!(conversation.forwarded_history().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
    max_forwarded: Option<usize>,
}

impl Conversation {
    /// Create an empty conversation. `None` forwards the full history.
    pub fn new(max_forwarded: Option<usize>) -> Self {
        Self {
            messages: Vec::new(),
            max_forwarded,
        }
    }

    /// Append a message. System messages are not part of the history and are ignored.
    pub fn push(&mut self, message: Message) {
        if *message.role() == Role::System {
            return;
        }
        self.messages.push(message);
    }

    /// All messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The slice of history that accompanies the next chat request.
    pub fn forwarded_history(&self) -> &[Message] {
        match self.max_forwarded {
            Some(max) if self.messages.len() > max => &self.messages[self.messages.len() - max..],
            _ => &self.messages,
        }
    }
}
