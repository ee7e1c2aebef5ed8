//! StateGraph middleware: with_middleware wraps every step's run.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use weft::graph::NodeRunFn;
use weft::{AgentError, LoggingNodeMiddleware, NodeMiddleware, StateGraph, END, START};

use crate::common::{RecordingNode, TraceState, TraceUpdate};

/// Records node ids as they run.
struct RecordingMiddleware {
    entered: Mutex<Vec<String>>,
}

#[async_trait]
impl NodeMiddleware<TraceState> for RecordingMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: TraceState,
        inner: NodeRunFn<TraceState>,
    ) -> Result<TraceUpdate, AgentError> {
        self.entered.lock().unwrap().push(node_id.to_string());
        inner(state).await
    }
}

/// Skips the wrapped step entirely for one node id.
struct SkipMiddleware {
    skip: &'static str,
}

#[async_trait]
impl NodeMiddleware<TraceState> for SkipMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: TraceState,
        inner: NodeRunFn<TraceState>,
    ) -> Result<TraceUpdate, AgentError> {
        if node_id == self.skip {
            return Ok(TraceUpdate::default());
        }
        inner(state).await
    }
}

fn two_step_graph() -> StateGraph<TraceState> {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_node("b", RecordingNode::new("b"))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", END);
    graph
}

/// **Scenario**: middleware sees every step in run order; the output is unchanged.
#[tokio::test]
async fn middleware_wraps_every_step() {
    let middleware = Arc::new(RecordingMiddleware {
        entered: Mutex::new(Vec::new()),
    });
    let compiled = two_step_graph()
        .with_middleware(middleware.clone())
        .compile()
        .unwrap();

    let out = compiled.invoke(TraceState::default(), None).await.unwrap();

    assert_eq!(out.visited(), vec!["a", "b"]);
    assert_eq!(*middleware.entered.lock().unwrap(), vec!["a", "b"]);
}

/// **Scenario**: middleware may short-circuit a step; its returned delta is what merges.
#[tokio::test]
async fn middleware_can_short_circuit_a_step() {
    let compiled = two_step_graph()
        .with_middleware(Arc::new(SkipMiddleware { skip: "a" }))
        .compile()
        .unwrap();

    let out = compiled.invoke(TraceState::default(), None).await.unwrap();
    assert_eq!(out.visited(), vec!["b"]);
}

/// **Scenario**: the logging middleware passes results through untouched.
#[tokio::test]
async fn logging_middleware_is_transparent() {
    let compiled = two_step_graph()
        .with_middleware(Arc::new(LoggingNodeMiddleware::default()))
        .compile()
        .unwrap();

    let out = compiled.invoke(TraceState::default(), None).await.unwrap();
    assert_eq!(out.visited(), vec!["a", "b"]);
    assert_eq!(out.count(), 2);
}
