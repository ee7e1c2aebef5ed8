//! Step execution error types.
//!
//! Returned by [`Node::run`](crate::graph::Node::run) when a step fails. The graph runner
//! wraps it into [`RunError::StepExecution`](crate::graph::RunError::StepExecution)
//! together with the last merged state.

use thiserror::Error;

use crate::llm::LlmError;

/// Step execution error.
///
/// Raised by a step's own logic. Collaborator failures (a failed model call) keep their
/// original error via [`AgentError::Llm`] so callers can inspect it unmodified.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. missing input, bad model output).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The language-model collaborator failed (transport, quota, API error).
    #[error("llm call failed: {0}")]
    Llm(#[from] LlmError),
}
