//! Anthropic Messages API client.
//!
//! Maps [`Message`]s onto the `/v1/messages` request shape: system messages are hoisted
//! into the top-level `system` field, assistant tool calls become `tool_use` blocks and
//! tool results become `tool_result` blocks in a user turn. Consecutive messages of the
//! same API role are folded into one turn.

use std::time::Duration;

use async_trait::async_trait;
use env_config::env_string;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::llm::{GenerationOptions, LlmClient, LlmError, LlmResponse, LlmUsage};
use crate::message::{Message, ToolCall};

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

const API_VERSION: &str = "2023-06-01";
const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Messages API client.
///
/// **Interaction**: Implements `LlmClient`; built by demos via [`ChatAnthropic::from_env`].
pub struct ChatAnthropic {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatAnthropic {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Reads `ANTHROPIC_API_KEY` (required) and `ANTHROPIC_BASE_URL` (optional).
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env_string(API_KEY_ENV)
            .ok_or_else(|| LlmError::MissingApiKey(API_KEY_ENV.to_string()))?;
        let client = Self::new(api_key);
        Ok(match env_string(BASE_URL_ENV) {
            Some(url) => client.with_base_url(url),
            None => client,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Default model used when `GenerationOptions::model` is `None`.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn request_body(&self, messages: &[Message], options: &GenerationOptions) -> Value {
        let (system, turns) = to_api_messages(messages);
        let mut body = json!({
            "model": options.model.as_deref().unwrap_or(&self.model),
            "max_tokens": options.max_tokens,
            "messages": turns,
        });
        if let Some(system) = system {
            body["system"] = Value::String(system);
        }
        if let Some(t) = options.temperature {
            body["temperature"] = json!(t);
        }
        if !options.tools.is_empty() {
            body["tools"] = Value::Array(
                options
                    .tools
                    .iter()
                    .map(|spec| {
                        json!({
                            "name": spec.name,
                            "description": spec.description,
                            "input_schema": spec.input_schema,
                        })
                    })
                    .collect(),
            );
        }
        body
    }
}

/// Splits messages into the optional system prompt and API turns.
fn to_api_messages(messages: &[Message]) -> (Option<String>, Vec<Value>) {
    let mut system: Vec<&str> = Vec::new();
    let mut turns: Vec<(&'static str, Vec<Value>)> = Vec::new();
    for m in messages {
        let (role, blocks) = match m {
            Message::System { content } => {
                system.push(content);
                continue;
            }
            Message::User { content } => ("user", vec![json!({"type": "text", "text": content})]),
            Message::Assistant {
                content,
                tool_calls,
            } => {
                let mut blocks = Vec::with_capacity(tool_calls.len() + 1);
                if !content.is_empty() {
                    blocks.push(json!({"type": "text", "text": content}));
                }
                for tc in tool_calls {
                    blocks.push(json!({
                        "type": "tool_use",
                        "id": tc.id,
                        "name": tc.name,
                        "input": tool_input(&tc.arguments),
                    }));
                }
                ("assistant", blocks)
            }
            Message::Tool {
                call_id,
                content,
                is_error,
            } => (
                "user",
                vec![json!({
                    "type": "tool_result",
                    "tool_use_id": call_id,
                    "content": content,
                    "is_error": is_error,
                })],
            ),
        };
        match turns.last_mut() {
            Some((last_role, last_blocks)) if *last_role == role => last_blocks.extend(blocks),
            _ => turns.push((role, blocks)),
        }
    }
    let system = if system.is_empty() {
        None
    } else {
        Some(system.join("\n\n"))
    };
    let turns = turns
        .into_iter()
        .map(|(role, content)| json!({"role": role, "content": content}))
        .collect();
    (system, turns)
}

/// The API requires `input` to be an object.
fn tool_input(arguments: &Value) -> Value {
    match arguments {
        Value::Object(_) => arguments.clone(),
        Value::Null => json!({}),
        other => json!({ "input": other }),
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct ApiUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn parse_response(body: ApiResponse) -> LlmResponse {
    let mut content = String::new();
    let mut tool_calls = Vec::new();
    for block in body.content {
        match block {
            ContentBlock::Text { text } => content.push_str(&text),
            ContentBlock::ToolUse { id, name, input } => {
                tool_calls.push(ToolCall::new(id, name, input))
            }
            ContentBlock::Other => {}
        }
    }
    LlmResponse {
        content,
        tool_calls,
        usage: body.usage.map(|u| LlmUsage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        }),
    }
}

fn error_for_status(status: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());
    match status {
        429 | 529 => LlmError::RateLimited(message),
        _ => LlmError::Api { status, message },
    }
}

#[async_trait]
impl LlmClient for ChatAnthropic {
    async fn invoke(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.request_body(messages, options);
        tracing::debug!(
            url = %url,
            messages = messages.len(),
            tools = options.tools.len(),
            "anthropic request"
        );
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "anthropic request failed");
            return Err(error_for_status(status.as_u16(), &text));
        }
        let parsed: ApiResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        let response = parse_response(parsed);
        tracing::debug!(
            tool_calls = response.tool_calls.len(),
            usage = ?response.usage,
            "anthropic response"
        );
        Ok(response)
    }
}
