//! Single-step chat graph: START → agent → END.
//!
//! Run it through a [`ConversationRunner`](crate::memory::ConversationRunner) to get a
//! memory-backed chat: each turn sees the stored history of its conversation id.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, Node, StateGraph, END, START};
use crate::llm::{GenerationOptions, LlmClient};
use crate::message::Message;

use super::state::{MessagesState, MessagesUpdate};

pub const CHAT_NODE: &str = "agent";

/// Calls the model with the full history (plus an optional system prompt) and appends
/// its reply.
pub struct ChatNode {
    llm: Arc<dyn LlmClient>,
    options: GenerationOptions,
    system_prompt: Option<String>,
}

impl ChatNode {
    pub fn new(llm: Arc<dyn LlmClient>, options: GenerationOptions) -> Self {
        Self {
            llm,
            options,
            system_prompt: None,
        }
    }

    /// Sent ahead of the history on every call; never stored in the state.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

#[async_trait]
impl Node<MessagesState> for ChatNode {
    fn id(&self) -> &str {
        CHAT_NODE
    }

    async fn run(&self, state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
        let response = match &self.system_prompt {
            Some(prompt) => {
                let mut messages = Vec::with_capacity(state.messages.len() + 1);
                messages.push(Message::system(prompt.clone()));
                messages.extend(state.messages.iter().cloned());
                self.llm.invoke(&messages, &self.options).await?
            }
            None => self.llm.invoke(&state.messages, &self.options).await?,
        };
        Ok(MessagesUpdate::one(Message::assistant(response.content)))
    }
}

/// Compiled chat graph over [`MessagesState`].
pub fn build_chat_graph(
    node: ChatNode,
) -> Result<CompiledStateGraph<MessagesState>, CompilationError> {
    let mut graph = StateGraph::new();
    graph.add_node(CHAT_NODE, Arc::new(node));
    graph.add_edge(START, CHAT_NODE);
    graph.add_edge(CHAT_NODE, END);
    graph.compile()
}
