mod builder;
mod stage;

use tracing::Instrument;

use crate::conversation::{Conversation, ConversationId, Message};
use crate::error::Error;
use crate::responder::Responder;
use crate::router::{Classification, Router};
use crate::session::SessionStore;
pub use builder::CoachBuilder;
use stage::TurnStage;

/// The result of a completed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// How the user message was routed.
    pub classification: Classification,
    /// The assistant message that was appended to the conversation.
    pub reply: Message,
}

/// A fitness & nutrition coach that routes each user message either to
/// the coaching model or to a fixed off-topic reply, and keeps the
/// history of every conversation.
///
/// Turns run one at a time: [`Coach::run_turn`] takes `&mut self`, so two
/// turns can never interleave on the same store.
pub struct Coach {
    router: Router,
    responder: Responder,
    sessions: SessionStore,
}

impl Coach {
    /// Allocates a fresh, empty conversation and returns its id.
    pub fn start_conversation(&mut self) -> ConversationId {
        let id = ConversationId::generate();
        self.sessions.get_or_create(id.as_str());
        id
    }

    /// Submits a user message and returns the assistant's reply text.
    ///
    /// Unknown conversation ids start a new conversation.
    #[inline]
    pub async fn submit_turn(
        &mut self,
        conversation_id: &str,
        user_text: &str,
    ) -> Result<String, Error> {
        let outcome = self.run_turn(conversation_id, user_text).await?;
        Ok(outcome.reply.into_content())
    }

    /// Runs one turn and reports how it was routed.
    ///
    /// The user message and the reply are committed to the conversation
    /// together once the reply exists. If the turn fails, the
    /// conversation is left as it was, so it always ends with a complete
    /// user/assistant pair.
    pub async fn run_turn(
        &mut self,
        conversation_id: &str,
        user_text: &str,
    ) -> Result<TurnOutcome, Error> {
        let span = debug_span!("turn", conversation_id);
        self.run_turn_checked(conversation_id, user_text)
            .instrument(span)
            .await
    }

    async fn run_turn_checked(
        &mut self,
        conversation_id: &str,
        user_text: &str,
    ) -> Result<TurnOutcome, Error> {
        let user_msg = Message::user(user_text);
        // Unknown ids are created by the commit below, not before.
        let mut history = self
            .sessions
            .get(conversation_id)
            .map(|c| c.messages().to_vec())
            .unwrap_or_default();
        history.push(user_msg.clone());

        let mut stage = TurnStage::Start;
        let (classification, reply) = loop {
            stage = match stage {
                TurnStage::Start => TurnStage::Classifying,
                TurnStage::Classifying => {
                    let classification = self
                        .router
                        .classify(user_text)
                        .await
                        .map_err(Error::classification)?;
                    TurnStage::after_classification(classification)
                }
                TurnStage::GeneratingCoach => {
                    let reply = self
                        .responder
                        .respond(&history)
                        .await
                        .map_err(Error::generation)?;
                    TurnStage::Done {
                        classification: Classification::OnTopic,
                        reply,
                    }
                }
                TurnStage::GeneratingOffTopic => TurnStage::Done {
                    classification: Classification::OffTopic,
                    reply: self.responder.respond_off_topic(),
                },
                TurnStage::Done {
                    classification,
                    reply,
                } => break (classification, reply),
            };
            trace!("entered stage {}", stage.name());
        };

        self.sessions.append(conversation_id, user_msg);
        self.sessions.append(conversation_id, reply.clone());
        info!("turn completed ({classification})");

        Ok(TurnOutcome {
            classification,
            reply,
        })
    }

    /// Returns the conversation for `conversation_id`, if any.
    #[inline]
    pub fn conversation(&self, conversation_id: &str) -> Option<&Conversation> {
        self.sessions.get(conversation_id)
    }

    /// Forgets a conversation. Returns `false` if it did not exist.
    #[inline]
    pub fn clear_conversation(&mut self, conversation_id: &str) -> bool {
        self.sessions.remove(conversation_id).is_some()
    }

    /// Returns the session store.
    #[inline]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
