//! Conversation-scoped graph runs.
//!
//! A turn hydrates the initial state from the store, runs the graph, and persists what
//! the run added to the message history. Persistence is all-or-nothing per turn: a
//! failed run leaves the stored history untouched.

use std::fmt::Debug;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::channels::GraphState;
use crate::graph::{CompiledStateGraph, RunConfig, RunError};

use super::ConversationStore;

/// A graph state that can be rebuilt from, and exposes, a message history.
pub trait ConversationState: GraphState {
    type Message: Clone + Send + Sync + Debug + 'static;

    /// Initial state for a turn: stored history followed by the new input.
    fn from_messages(messages: Vec<Self::Message>) -> Self;

    /// Full message history of the state.
    fn messages(&self) -> &[Self::Message];
}

/// Runs a compiled graph against a conversation store.
///
/// Turns on the same conversation id are serialized, so two concurrent turns can never
/// both build on the same stale history. Turns on different ids run independently.
pub struct ConversationRunner<S: ConversationState> {
    graph: CompiledStateGraph<S>,
    store: Arc<dyn ConversationStore<S::Message>>,
    turn_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: ConversationState> ConversationRunner<S> {
    pub fn new(graph: CompiledStateGraph<S>, store: Arc<dyn ConversationStore<S::Message>>) -> Self {
        Self {
            graph,
            store,
            turn_locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore<S::Message>> {
        &self.store
    }

    /// Runs one turn for `conversation_id` with `input` appended to its history.
    ///
    /// On success the input and every message the run produced are appended to the
    /// store and the final state is returned. On error nothing is stored.
    pub async fn send(
        &self,
        conversation_id: &str,
        input: Vec<S::Message>,
        config: Option<RunConfig>,
    ) -> Result<S, RunError<S>> {
        let lock = self
            .turn_locks
            .entry(conversation_id.to_string())
            .or_default()
            .clone();
        let _turn = lock.lock().await;

        let mut messages = self.store.load(conversation_id).await;
        let persisted = messages.len();
        messages.extend(input);
        tracing::info!(
            conversation_id,
            history = persisted,
            "conversation turn start"
        );

        let final_state = match self.graph.invoke(S::from_messages(messages), config).await {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(conversation_id, error = %err, "conversation turn failed; history unchanged");
                return Err(err);
            }
        };

        let new_messages = final_state
            .messages()
            .get(persisted..)
            .unwrap_or_default()
            .to_vec();
        let added = new_messages.len();
        self.store.append(conversation_id, new_messages).await;
        tracing::info!(conversation_id, added, "conversation turn complete");
        Ok(final_state)
    }

    /// Stored history for `conversation_id`.
    pub async fn history(&self, conversation_id: &str) -> Vec<S::Message> {
        self.store.snapshot(conversation_id).await
    }
}
