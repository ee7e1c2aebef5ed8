//! Logging middleware that records node enter/exit around each node.run call.

use std::marker::PhantomData;
use std::time::Instant;

use async_trait::async_trait;

use crate::channels::GraphState;
use crate::error::AgentError;

use super::node_middleware::{NodeMiddleware, NodeRunFn};

/// Middleware that emits `tracing` events on node enter and exit, with elapsed time.
///
/// Generic over state type `S`; only the node id and outcome are logged.
pub struct LoggingNodeMiddleware<S> {
    _phantom: PhantomData<fn() -> S>,
}

impl<S> Default for LoggingNodeMiddleware<S> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware<S>
where
    S: GraphState,
{
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<S::Update, AgentError> {
        tracing::info!(node = node_id, "enter node");
        let started = Instant::now();
        let result = inner(state).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(update) => tracing::info!(node = node_id, elapsed_ms, ?update, "exit node"),
            Err(e) => tracing::warn!(node = node_id, elapsed_ms, error = %e, "exit node with error"),
        }
        result
    }
}
