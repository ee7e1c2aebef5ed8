//! Mock LLM for tests and examples.
//!
//! Replays a script of responses (or errors) in order; once the script is exhausted the
//! last entry repeats. Every call's messages and options are recorded so tests can assert
//! on what a step sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{GenerationOptions, LlmClient, LlmError, LlmResponse};
use crate::message::{Message, ToolCall};

/// A recorded call: messages and options passed to `invoke`.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
}

/// Scripted LLM.
///
/// **Interaction**: Implements `LlmClient`; used by `DecideNode`, `ChatNode` and the triage
/// steps in tests and demos.
pub struct MockLlm {
    script: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    last: Mutex<Option<Result<LlmResponse, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockLlm {
    /// Replays `responses` in order, repeating the last one afterwards.
    pub fn scripted(responses: Vec<Result<LlmResponse, LlmError>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `content` and no tool calls (END path of a tool loop).
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(LlmResponse::text(content))])
    }

    /// First call requests `tool_calls`, every later call answers `final_answer`.
    pub fn first_tools_then_end(tool_calls: Vec<ToolCall>, final_answer: impl Into<String>) -> Self {
        Self::scripted(vec![
            Ok(LlmResponse::with_tool_calls("", tool_calls)),
            Ok(LlmResponse::text(final_answer)),
        ])
    }

    /// Every call fails with `error`.
    pub fn failing(error: LlmError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Snapshot of every recorded call.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> Result<LlmResponse, LlmError> {
        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(r) = next {
            *last = Some(r);
        }
        last.clone().unwrap_or_else(|| {
            Err(LlmError::InvalidResponse(
                "mock llm has an empty script".into(),
            ))
        })
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<LlmResponse, LlmError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                messages: messages.to_vec(),
                options: options.clone(),
            });
        }
        self.next_response()
    }
}
