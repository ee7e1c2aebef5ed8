//! Graph node trait: one step in a StateGraph.
//!
//! Receives the current state by reference and returns a partial update
//! (`S::Update`). The runner merges the update; nodes never see the graph and never
//! choose the next step themselves. Routing lives in edges.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::channels::GraphState;
use crate::error::AgentError;

/// One step in a graph: state in, delta out.
///
/// **Interaction**: Registered with `StateGraph::add_node`; invoked by
/// `CompiledStateGraph::invoke`, optionally through a `NodeMiddleware`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: GraphState,
{
    /// Node id (e.g. `"classify"`, `"tools"`). Used in logs.
    fn id(&self) -> &str;

    /// One step. Returning `Err` stops the run with `RunError::StepExecution`.
    async fn run(&self, state: &S) -> Result<S::Update, AgentError>;
}

/// Node backed by an async closure. The closure receives a clone of the state.
///
/// ```rust
/// use weft::graph::FnNode;
/// # use weft::channels::{Channel, GraphState, LastValue};
/// # #[derive(Clone, Debug, Default)]
/// # struct Counter { n: LastValue<i32> }
/// # impl GraphState for Counter {
/// #     type Update = Option<i32>;
/// #     fn merge(&mut self, u: Option<i32>) { self.n.merge(u) }
/// # }
/// let inc = FnNode::new("inc", |s: Counter| async move {
///     Ok(Some(s.n.get().copied().unwrap_or(0) + 1))
/// });
/// ```
pub struct FnNode<S: GraphState> {
    id: String,
    f: Arc<dyn Fn(S) -> futures::future::BoxFuture<'static, Result<S::Update, AgentError>> + Send + Sync>,
}

impl<S: GraphState> FnNode<S> {
    pub fn new<F, Fut>(id: impl Into<String>, f: F) -> Self
    where
        F: Fn(S) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<S::Update, AgentError>> + Send + 'static,
    {
        Self {
            id: id.into(),
            f: Arc::new(move |s| Box::pin(f(s))),
        }
    }
}

impl<S: GraphState> fmt::Debug for FnNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnNode").field("id", &self.id).finish()
    }
}

#[async_trait]
impl<S: GraphState> Node<S> for FnNode<S> {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, state: &S) -> Result<S::Update, AgentError> {
        (self.f)(state.clone()).await
    }
}
