//! LLM client abstraction.
//!
//! Steps that talk to a model depend on [`LlmClient`] only: given the message sequence and
//! [`GenerationOptions`], return assistant text plus any tool calls. Implementations:
//! [`MockLlm`] (scripted, for tests and demos) and [`ChatAnthropic`] (Messages API over HTTP).
//!
//! Retry, backoff and timeouts belong to the client, never to the graph runner.

mod anthropic;
mod mock;

pub use anthropic::{ChatAnthropic, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_MODEL};
pub use mock::MockLlm;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::message::{Message, ToolCall};
use crate::tools::ToolSpec;

/// Per-call generation options.
///
/// `model: None` means "the client's default model". `tools` are the specs the model may
/// call this turn; empty disables tool use.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub tools: Vec<ToolSpec>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 1024,
            temperature: None,
            tools: Vec::new(),
        }
    }
}

impl GenerationOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }
}

/// Token usage for one LLM call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Response from one completion: assistant text and zero or more tool calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmResponse {
    pub content: String,
    /// Tool calls from this turn; empty means a final answer.
    pub tool_calls: Vec<ToolCall>,
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    /// Text-only response.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            usage: None,
        }
    }

    /// Converts into the assistant message appended to conversation state.
    pub fn into_message(self) -> Message {
        Message::assistant_with_tool_calls(self.content, self.tool_calls)
    }
}

/// Errors from the completion collaborator. Surfaced unmodified inside
/// [`AgentError::Llm`](crate::error::AgentError::Llm).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LlmError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("rate limited or over quota: {0}")]
    RateLimited(String),
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("missing api key: set {0}")]
    MissingApiKey(String),
}

/// LLM client: given messages and options, returns assistant text and optional tool calls.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion turn over the full message sequence.
    async fn invoke(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<LlmResponse, LlmError>;
}
