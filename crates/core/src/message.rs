//! Conversation message types.
//!
//! A loop invocation owns one append-only `Vec<Message>`. Messages are never
//! reordered or removed once appended; the model always observes a prefix of
//! its own prior exchanges in call order.
//!
//! There is no `assistant` role here: the loop re-injects the model's raw
//! reply as a `system` message before the synthetic observation turn, so a
//! two-variant enum covers every message the wire ever carries.

use serde::{Deserialize, Serialize};

/// The sender of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions, tool catalog, and re-injected model replies
    System,
    /// The end user's prompt and synthetic observation turns
    User,
}

/// A single turn in the conversation sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Wrap a tool observation in the synthetic user turn the model sees.
    pub fn observation(observation: impl AsRef<str>) -> Self {
        Self::user(format!("Observation: {}", observation.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(Message::system("rules").role, Role::System);
        assert_eq!(Message::user("hello").role, Role::User);
    }

    #[test]
    fn observation_is_a_prefixed_user_turn() {
        let msg = Message::observation("16");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Observation: 16");
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"user\""));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
