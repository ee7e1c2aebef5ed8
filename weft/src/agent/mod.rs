//! Prebuilt graphs.
//!
//! - [`tool_loop`]: decide/tools loop over [`MessagesState`] (model calls tools until it
//!   answers without any).
//! - [`chat`]: single-step chat over [`MessagesState`]; pair with
//!   [`ConversationRunner`](crate::memory::ConversationRunner) for per-conversation memory.
//! - [`triage`]: support-ticket classification and routing over [`TicketState`].
//!
//! All of them reach the model only through [`LlmClient`](crate::llm::LlmClient), so they
//! run unchanged against [`MockLlm`](crate::llm::MockLlm) in tests.

pub mod chat;
mod state;
pub mod tool_loop;
pub mod triage;

pub use chat::{build_chat_graph, ChatNode, CHAT_NODE};
pub use state::{MessagesState, MessagesUpdate};
pub use tool_loop::{
    build_tool_loop_graph, tool_loop_graph, tools_condition, DecideNode, ToolsConditionResult,
    ToolsNode, DECIDE_NODE, DEFAULT_TOOL_ERROR_TEMPLATE, TOOLS_NODE,
};
pub use triage::{build_triage_graph, route_ticket, Category, TicketState, TicketUpdate};
