//! Tool-use loop: decide → (tools → decide)* → END.
//!
//! - [`DecideNode`] asks the model for the next assistant message, offering the registered
//!   tool specs.
//! - [`tools_condition`] routes on the latest message: no tool calls ends the run.
//! - [`ToolsNode`] runs every requested tool in order and appends one tool message per
//!   call. A failing or unknown tool becomes an error tool message; the run continues so
//!   the model can see the failure and recover.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, Node, StateGraph, END, START};
use crate::llm::{GenerationOptions, LlmClient};
use crate::message::Message;
use crate::tools::ToolRegistry;

use super::state::{MessagesState, MessagesUpdate};

pub const DECIDE_NODE: &str = "decide";
pub const TOOLS_NODE: &str = "tools";

/// Default text of an error tool message. `{error}` is replaced by the tool error.
pub const DEFAULT_TOOL_ERROR_TEMPLATE: &str = "Error: {error}\n Please fix your mistakes.";

/// Output of [`tools_condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsConditionResult {
    Tools,
    End,
}

impl ToolsConditionResult {
    /// Route key: `"tools"` or `"end"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::End => "end",
        }
    }
}

/// Routes to `tools` when the latest message requests at least one tool call, else `end`.
pub fn tools_condition(state: &MessagesState) -> ToolsConditionResult {
    match state.last_message() {
        Some(m) if !m.tool_calls().is_empty() => ToolsConditionResult::Tools,
        _ => ToolsConditionResult::End,
    }
}

/// Calls the model with the full history and the tool specs; appends its reply.
pub struct DecideNode {
    llm: Arc<dyn LlmClient>,
    options: GenerationOptions,
}

impl DecideNode {
    /// `tools` specs are added to `options` so the model knows what it may call.
    pub fn new(llm: Arc<dyn LlmClient>, tools: &ToolRegistry, options: GenerationOptions) -> Self {
        Self {
            llm,
            options: options.with_tools(tools.specs()),
        }
    }
}

#[async_trait]
impl Node<MessagesState> for DecideNode {
    fn id(&self) -> &str {
        DECIDE_NODE
    }

    async fn run(&self, state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
        let response = self.llm.invoke(&state.messages, &self.options).await?;
        tracing::debug!(
            tool_calls = response.tool_calls.len(),
            "decide: model replied"
        );
        Ok(MessagesUpdate::one(response.into_message()))
    }
}

/// Executes the tool calls of the latest assistant message, sequentially.
pub struct ToolsNode {
    tools: ToolRegistry,
    error_template: String,
}

impl ToolsNode {
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools,
            error_template: DEFAULT_TOOL_ERROR_TEMPLATE.to_string(),
        }
    }

    /// Template for error tool messages; `{error}` is replaced by the error text.
    pub fn with_error_template(mut self, template: impl Into<String>) -> Self {
        self.error_template = template.into();
        self
    }
}

#[async_trait]
impl Node<MessagesState> for ToolsNode {
    fn id(&self) -> &str {
        TOOLS_NODE
    }

    async fn run(&self, state: &MessagesState) -> Result<MessagesUpdate, AgentError> {
        let calls = state
            .last_message()
            .map(|m| m.tool_calls().to_vec())
            .unwrap_or_default();
        let mut messages = Vec::with_capacity(calls.len());
        for call in calls {
            match self.tools.call(&call.name, call.arguments.clone()).await {
                Ok(content) => {
                    tracing::debug!(tool = %call.name, call_id = %call.id, "tool call ok");
                    messages.push(Message::tool_result(call.id, content));
                }
                Err(e) => {
                    tracing::warn!(tool = %call.name, call_id = %call.id, error = %e, "tool call failed");
                    let text = self.error_template.replace("{error}", &e.to_string());
                    messages.push(Message::tool_error(call.id, text));
                }
            }
        }
        Ok(MessagesUpdate { messages })
    }
}

/// Uncompiled tool loop, for callers that want middleware or a step limit.
pub fn tool_loop_graph(
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    options: GenerationOptions,
) -> StateGraph<MessagesState> {
    let mut graph = StateGraph::new();
    graph.add_node(DECIDE_NODE, Arc::new(DecideNode::new(llm, &tools, options)));
    graph.add_node(TOOLS_NODE, Arc::new(ToolsNode::new(tools)));
    graph.add_edge(START, DECIDE_NODE);
    let path_map: HashMap<String, String> = [
        (ToolsConditionResult::Tools.as_str().to_string(), TOOLS_NODE.to_string()),
        (ToolsConditionResult::End.as_str().to_string(), END.to_string()),
    ]
    .into_iter()
    .collect();
    graph.add_conditional_edges(
        DECIDE_NODE,
        Arc::new(|state: &MessagesState| tools_condition(state).as_str().to_string()),
        Some(path_map),
    );
    graph.add_edge(TOOLS_NODE, DECIDE_NODE);
    graph
}

/// Compiled tool loop over [`MessagesState`].
pub fn build_tool_loop_graph(
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    options: GenerationOptions,
) -> Result<CompiledStateGraph<MessagesState>, CompilationError> {
    tool_loop_graph(llm, tools, options).compile()
}
