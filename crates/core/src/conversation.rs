//! Conversation-related types.

use std::borrow::Borrow;
use std::fmt::{self, Display};

use fitcoach_model::ModelMessage;
use uuid::Uuid;

/// The author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The person talking to the coach.
    User,
    /// The coach.
    Assistant,
    /// Instructions that frame the assistant.
    System,
}

/// A message in a conversation. Messages are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Creates a message authored by the user.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a message authored by the assistant.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message.
    #[inline]
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }

    #[inline]
    fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Returns the author of this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text of this message.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consumes the message and returns its text.
    #[inline]
    pub fn into_content(self) -> String {
        self.content
    }

    pub(crate) fn to_model_message(&self) -> ModelMessage {
        let content = self.content.clone();
        match self.role {
            Role::User => ModelMessage::User(content),
            Role::Assistant => ModelMessage::Assistant(content),
            Role::System => ModelMessage::System(content),
        }
    }
}

/// An opaque identifier that scopes a message history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(String);

impl ConversationId {
    /// Generates a fresh random identifier.
    #[inline]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConversationId {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ConversationId {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ConversationId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a conversation: an ordered, append-only message sequence.
#[derive(Clone, Debug)]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
}

impl Conversation {
    pub(crate) fn new(id: ConversationId) -> Self {
        Self {
            id,
            messages: vec![],
        }
    }

    /// Returns the identifier of this conversation.
    #[inline]
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Returns the messages in submission order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been said yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[inline]
    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_model_message() {
        assert_eq!(
            Message::user("How much protein?").to_model_message(),
            ModelMessage::User("How much protein?".to_owned())
        );
        assert_eq!(
            Message::assistant("About 1.6 g/kg.").to_model_message(),
            ModelMessage::Assistant("About 1.6 g/kg.".to_owned())
        );
        assert_eq!(
            Message::system("Be concise.").to_model_message(),
            ModelMessage::System("Be concise.".to_owned())
        );
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ConversationId::generate();
        let b = ConversationId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }
}
