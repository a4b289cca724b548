//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message.
///
/// Conversation history only ever holds `User` and `Assistant` messages;
/// `System` carries the fixed instruction attached to a request.
///
/// # Examples
///
/// ```
/// use cms_architect_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages are from the human
    User,
    /// Assistant messages are from the AI
    Assistant,
}
