//! Node middleware: wrap node.run with external async logic (around pattern).
//!
//! Set via `StateGraph::with_middleware`.

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::channels::GraphState;
use crate::error::AgentError;

/// The wrapped step: call it with the state to run the node.
pub type NodeRunFn<S> = Box<
    dyn FnOnce(S) -> BoxFuture<'static, Result<<S as GraphState>::Update, AgentError>> + Send,
>;

/// Async middleware that wraps node.run.
///
/// Can decide when to call `inner`, observe or rewrite its result, or short-circuit.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: GraphState,
{
    /// - `node_id`: current node id
    /// - `state`: state passed to the node
    /// - `inner`: actual node.run logic, must be called to execute the node
    async fn around_run(
        &self,
        node_id: &str,
        state: S,
        inner: NodeRunFn<S>,
    ) -> Result<S::Update, AgentError>;
}
