//! A step that contributes nothing to the state.

use async_trait::async_trait;

use crate::channels::GraphState;
use crate::error::AgentError;

use super::Node;

/// Returns `S::Update::default()`, which merges as "no change" for every channel.
///
/// Handy as a join point in a graph or as a stand-in while wiring edges.
pub struct NoopNode {
    id: String,
}

impl NoopNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl<S> Node<S> for NoopNode
where
    S: GraphState,
    S::Update: Default,
{
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, _state: &S) -> Result<S::Update, AgentError> {
        Ok(S::Update::default())
    }
}
