//! # Weft
//!
//! A small state-graph runner for LLM workflows. One shared state type flows through named
//! steps; each step returns a delta that the state merges per field, and edges (static or
//! conditional) pick the next step until the run reaches [`END`].
//!
//! ## Design principles
//!
//! - **State in, state out**: [`CompiledStateGraph::invoke`] takes the initial state and
//!   returns the final one. Failures come back as [`RunError`] carrying the last merged state.
//! - **Deltas, not mutation**: steps see `&S` and return `S::Update`; [`GraphState::merge`]
//!   applies it (overwrite via [`LastValue`], append via [`Topic`]).
//! - **Narrow seams**: the model is an [`LlmClient`], tools are [`Tool`]s, histories live in a
//!   [`ConversationStore`]. Every prebuilt graph runs against [`MockLlm`] in tests.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`RunConfig`], [`RunError`],
//!   middleware and visualization.
//! - [`channels`]: [`GraphState`], [`LastValue`], [`Topic`].
//! - [`memory`]: [`ConversationStore`], [`InMemoryConversationStore`], [`ConversationRunner`].
//! - [`agent`]: prebuilt graphs: tool loop ([`build_tool_loop_graph`]), chat
//!   ([`build_chat_graph`]), ticket triage ([`build_triage_graph`]).
//! - [`llm`]: [`LlmClient`], [`MockLlm`], [`ChatAnthropic`].
//! - [`tools`]: [`Tool`], [`ToolRegistry`], [`FnTool`], [`Calculator`].
//! - [`message`]: [`Message`], [`ToolCall`].
//! - [`config`]: [`RunSettings`] from `WEFT_*` environment variables.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weft::{build_triage_graph, GenerationOptions, MockLlm, TicketState};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockLlm::with_no_tool_calls("billing"));
//! let graph = build_triage_graph(llm, GenerationOptions::default())?;
//! let done = graph
//!     .invoke(TicketState::new("TKT-001", "I was charged twice"), None)
//!     .await?;
//! println!("{}", done.formatted().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod channels;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod tools;

pub use agent::{
    build_chat_graph, build_tool_loop_graph, build_triage_graph, tools_condition, Category,
    ChatNode, DecideNode, MessagesState, MessagesUpdate, TicketState, TicketUpdate,
    ToolsConditionResult, ToolsNode,
};
pub use channels::{Channel, GraphState, LastValue, Topic};
pub use config::RunSettings;
pub use error::AgentError;
pub use graph::{
    generate_mermaid, generate_text, CompilationError, CompiledStateGraph, FnNode,
    LoggingNodeMiddleware, Node, NodeMiddleware, RunConfig, RunError, StateGraph, END, START,
};
pub use llm::{ChatAnthropic, GenerationOptions, LlmClient, LlmError, LlmResponse, MockLlm};
pub use memory::{
    ConversationRunner, ConversationState, ConversationStore, InMemoryConversationStore,
};
pub use message::{Message, ToolCall};
pub use tools::{Calculator, FnTool, Tool, ToolError, ToolRegistry, ToolSpec};
