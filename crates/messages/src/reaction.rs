//! Emoji reactions to previously received messages.

use serde::Serialize;

use crate::OutboundMessage;

/// A reaction to an existing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reaction {
    message_id: String,
    emoji: String,
}

impl Reaction {
    pub fn new(message_id: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            emoji: emoji.into(),
        }
    }

    /// Withdraw an earlier reaction. The API treats an empty emoji as removal.
    pub fn remove(message_id: impl Into<String>) -> Self {
        Self::new(message_id, "")
    }
}

impl OutboundMessage for Reaction {
    fn message_type(&self) -> &'static str {
        "reaction"
    }
}
