//! Message types for conversation history.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message in a conversation.
///
/// # Examples
///
/// ```
/// use cms_architect_core::{Message, Role};
///
/// let message = Message::user("Build a CMS for a bootcamp");
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.text(), "Build a CMS for a bootcamp");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The message text
    text: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// Create a system instruction message.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }
}
