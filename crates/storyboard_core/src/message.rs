//! Message types for prompts.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text turn sent to the model.
///
/// # Examples
///
/// ```
/// use storyboard_core::{Message, Role};
///
/// let message = Message::user("Write a story");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Write a story");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The message text
    pub content: String,
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
