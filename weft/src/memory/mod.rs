//! Conversation memory: per-id message histories and conversation-scoped runs.
//!
//! - [`ConversationStore`] / [`InMemoryConversationStore`]: append-only histories keyed
//!   by conversation id.
//! - [`ConversationRunner`]: loads a history, runs a graph on it, persists what the run
//!   added (only when the run succeeds).

mod conversation_runner;
mod conversation_store;

pub use conversation_runner::{ConversationRunner, ConversationState};
pub use conversation_store::{ConversationStore, InMemoryConversationStore};
