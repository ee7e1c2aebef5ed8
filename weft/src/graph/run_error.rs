//! Run configuration and run errors.
//!
//! Every [`RunError`] variant carries the last merged state so callers can inspect
//! partial progress (e.g. the messages a tool loop produced before it was cut off).

use std::fmt::Debug;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::error::AgentError;

/// Per-run options for `CompiledStateGraph::invoke`.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Maximum step invocations; overrides the graph's own limit. `None` = graph default.
    pub step_limit: Option<usize>,
    /// Checked before each step; a step in flight is never interrupted.
    pub cancellation: Option<CancellationToken>,
}

impl RunConfig {
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Error returned by `CompiledStateGraph::invoke`.
#[derive(Debug, Error)]
pub enum RunError<S: Debug> {
    /// A route resolved to an id that is not a registered step.
    #[error("unknown step: {step}")]
    UnknownStep { step: String, state: S },

    /// A router returned a key missing from its path map and no default route exists.
    #[error("route key {key:?} from step {step} is not mapped")]
    UnmappedRoute { step: String, key: String, state: S },

    /// A step returned an error. `source` is the step's error, unmodified.
    #[error("step {step} failed: {source}")]
    StepExecution {
        step: String,
        #[source]
        source: AgentError,
        state: S,
    },

    /// The run reached its step limit before reaching END.
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize, state: S },

    /// The cancellation token fired between steps.
    #[error("run cancelled before step {next_step}")]
    Cancelled { next_step: String, state: S },
}

impl<S: Debug> RunError<S> {
    /// Last merged state at the point of failure.
    pub fn state(&self) -> &S {
        match self {
            Self::UnknownStep { state, .. }
            | Self::UnmappedRoute { state, .. }
            | Self::StepExecution { state, .. }
            | Self::StepLimitExceeded { state, .. }
            | Self::Cancelled { state, .. } => state,
        }
    }

    pub fn into_state(self) -> S {
        match self {
            Self::UnknownStep { state, .. }
            | Self::UnmappedRoute { state, .. }
            | Self::StepExecution { state, .. }
            | Self::StepLimitExceeded { state, .. }
            | Self::Cancelled { state, .. } => state,
        }
    }

    /// True when the graph itself is sound and the run was merely stopped early
    /// (step limit or cancellation); re-invoking from `into_state()` is meaningful.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::StepLimitExceeded { .. } | Self::Cancelled { .. }
        )
    }
}
