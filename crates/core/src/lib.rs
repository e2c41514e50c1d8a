//! Core logic of the coach: topic routing, response generation, and
//! per-conversation message history.
//!
//! A [`Coach`] runs one turn at a time. Each turn classifies the latest
//! user message, then either asks the model for a coaching answer (with
//! the whole history) or returns the fixed off-topic reply. Both messages
//! of a completed turn are committed to the [`SessionStore`].

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod coach;
pub mod config;
pub mod conversation;
mod error;
mod model_client;
mod responder;
mod router;
mod session;

pub use coach::{Coach, CoachBuilder, TurnOutcome};
pub use config::{CoachConfig, CoachConfigBuilder};
pub use conversation::{Conversation, ConversationId, Message, Role};
pub use error::{Error, ErrorKind};
pub use fitcoach_model::ErrorKind as ModelErrorKind;
pub use router::Classification;
pub use session::SessionStore;
