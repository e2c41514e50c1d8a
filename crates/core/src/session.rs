use std::collections::HashMap;

use crate::conversation::{Conversation, ConversationId, Message};

/// In-memory storage of conversations, keyed by conversation id.
///
/// Histories are append-only and grow without bound for the lifetime of
/// the store. A conversation only disappears when it is removed
/// explicitly. Mutation requires `&mut self`, so there is exactly one
/// writer at a time.
#[derive(Debug, Default)]
pub struct SessionStore {
    conversations: HashMap<ConversationId, Conversation>,
}

impl SessionStore {
    /// Returns the conversation for `id`, creating an empty one first if
    /// the id is unknown.
    pub fn get_or_create(&mut self, id: &str) -> &mut Conversation {
        if !self.conversations.contains_key(id) {
            debug!("created conversation (conversation_id={id})");
        }
        self.conversations
            .entry(ConversationId::from(id))
            .or_insert_with_key(|key| Conversation::new(key.clone()))
    }

    /// Returns the conversation for `id`, if any.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    /// Appends a message to the conversation for `id`, creating the
    /// conversation if needed.
    #[inline]
    pub fn append(&mut self, id: &str, message: Message) {
        self.get_or_create(id).push(message);
    }

    /// Removes the conversation for `id` and returns it.
    #[inline]
    pub fn remove(&mut self, id: &str) -> Option<Conversation> {
        let removed = self.conversations.remove(id);
        if removed.is_some() {
            debug!("removed conversation (conversation_id={id})");
        }
        removed
    }

    /// Returns the number of stored conversations.
    #[inline]
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Returns `true` if no conversation is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;

    #[test]
    fn test_get_or_create() {
        let mut store = SessionStore::default();
        assert!(store.get("t1").is_none());

        let conversation = store.get_or_create("t1");
        assert_eq!(conversation.id().as_str(), "t1");
        assert!(conversation.is_empty());

        store.get_or_create("t1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut store = SessionStore::default();
        store.append("t1", Message::user("I want to run a 5k"));
        store.append("t1", Message::assistant("How often do you run now?"));
        store.append("t2", Message::user("Hello"));

        let conversation = store.get("t1").unwrap();
        let roles: Vec<_> =
            conversation.messages().iter().map(Message::role).collect();
        assert_eq!(roles, [Role::User, Role::Assistant]);
        assert_eq!(
            conversation.messages()[1].content(),
            "How often do you run now?"
        );
        assert_eq!(store.get("t2").unwrap().len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = SessionStore::default();
        store.append("t1", Message::user("Hi"));
        let removed = store.remove("t1").unwrap();
        assert_eq!(removed.len(), 1);
        assert!(store.remove("t1").is_none());
        assert!(store.is_empty());
    }
}
