//! Conversation message types.
//!
//! Message roles: System (usually first in the list), User, Assistant.
//! Used by `ConversationState::messages` and by the stage nodes that read
//! history and append replies.

/// A single message in the conversation.
///
/// Roles: system prompt, user input, assistant reply.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// System prompt; typically placed first in the message list.
    System(String),
    /// User input.
    User(String),
    /// Model/agent reply.
    Assistant(String),
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    /// Role label for prompt rendering ("system" / "user" / "assistant").
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
            Self::Assistant(_) => "assistant",
        }
    }

    /// Message text regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(c) | Self::User(c) | Self::Assistant(c) => c,
        }
    }

    /// True for user-authored messages; used when scanning backward for the
    /// latest user utterance.
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}
