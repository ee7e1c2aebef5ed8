//! Run errors: step failures, step limits, cancellation.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use weft::{AgentError, FnNode, RunConfig, RunError, StateGraph, END, START};

use crate::common::{path_map, FailingNode, RecordingNode, TraceState, TraceUpdate};

/// `a -> failing -> b -> END`.
fn failing_chain(b: Arc<RecordingNode>) -> StateGraph<TraceState> {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_node("failing", Arc::new(FailingNode))
        .add_node("b", b)
        .add_edge(START, "a")
        .add_edge("a", "failing")
        .add_edge("failing", "b")
        .add_edge("b", END);
    graph
}

/// Endless loop: `spin -> spin`, END only reachable in the route table.
fn spinning_graph() -> StateGraph<TraceState> {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("spin", RecordingNode::new("spin"))
        .add_edge(START, "spin")
        .add_conditional_edges(
            "spin",
            Arc::new(|_s: &TraceState| "again".to_string()),
            Some(path_map(&[("again", "spin"), ("never", END)])),
        );
    graph
}

/// **Scenario**: a failing step stops the run with StepExecution; the error names the
/// step, keeps the step's error unmodified and carries the state merged so far.
#[tokio::test]
async fn failing_step_returns_step_execution_with_state() {
    let b = RecordingNode::new("b");
    let compiled = failing_chain(b.clone()).compile().unwrap();

    let err = compiled
        .invoke(TraceState::default(), None)
        .await
        .unwrap_err();

    match &err {
        RunError::StepExecution { step, source, state } => {
            assert_eq!(step, "failing");
            assert!(matches!(source, AgentError::ExecutionFailed(m) if m == "always fails"));
            assert_eq!(state.visited(), vec!["a"]);
        }
        other => panic!("expected StepExecution, got {:?}", other),
    }
    assert_eq!(b.calls(), 0);
    assert_eq!(err.into_state().count(), 1);
}

/// **Scenario**: the source chain of StepExecution reaches the step's error.
#[tokio::test]
async fn step_execution_exposes_source() {
    let err = failing_chain(RecordingNode::new("b"))
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap_err();

    let source = std::error::Error::source(&err).map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("execution failed: always fails"));
}

/// **Scenario**: a graph-level step limit stops a cycle before the limit+1-th step.
#[tokio::test]
async fn graph_step_limit_stops_cycle() {
    let compiled = spinning_graph().with_step_limit(5).compile().unwrap();

    let err = compiled
        .invoke(TraceState::default(), None)
        .await
        .unwrap_err();

    match &err {
        RunError::StepLimitExceeded { limit, state } => {
            assert_eq!(*limit, 5);
            assert_eq!(state.count(), 5);
        }
        other => panic!("expected StepLimitExceeded, got {:?}", other),
    }
    assert!(err.is_recoverable());
}

/// **Scenario**: a per-run step limit overrides the graph's own limit.
#[tokio::test]
async fn run_step_limit_overrides_graph_limit() {
    let compiled = spinning_graph().with_step_limit(50).compile().unwrap();

    let err = compiled
        .invoke(
            TraceState::default(),
            Some(RunConfig::default().with_step_limit(2)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::StepLimitExceeded { limit: 2, .. }));
    assert_eq!(err.state().count(), 2);
}

/// **Scenario**: a limit equal to the number of steps a run needs is not exceeded.
#[tokio::test]
async fn step_limit_allows_exactly_limit_steps() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_node("b", RecordingNode::new("b"))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", END);

    let out = graph
        .with_step_limit(2)
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap();
    assert_eq!(out.count(), 2);
}

/// **Scenario**: a token cancelled before the run stops it before the entry step.
#[tokio::test]
async fn cancelled_token_stops_before_first_step() {
    let token = CancellationToken::new();
    token.cancel();
    let a = RecordingNode::new("a");
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", a.clone())
        .add_edge(START, "a")
        .add_edge("a", END);

    let err = graph
        .compile()
        .unwrap()
        .invoke(
            TraceState::default(),
            Some(RunConfig::default().with_cancellation(token)),
        )
        .await
        .unwrap_err();

    match err {
        RunError::Cancelled { next_step, state } => {
            assert_eq!(next_step, "a");
            assert_eq!(state, TraceState::default());
        }
        other => panic!("expected Cancelled, got {:?}", other),
    }
    assert_eq!(a.calls(), 0);
}

/// **Scenario**: cancelling from inside a step lets that step finish; the run stops before
/// the next one.
#[tokio::test]
async fn cancellation_is_checked_between_steps() {
    let token = CancellationToken::new();
    let inner = token.clone();
    let after = RecordingNode::new("after");
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node(
            "cancel",
            Arc::new(FnNode::new("cancel", move |_s: TraceState| {
                let token = inner.clone();
                async move {
                    token.cancel();
                    Ok(TraceUpdate {
                        visited: vec!["cancel".into()],
                        ..Default::default()
                    })
                }
            })),
        )
        .add_node("after", after.clone())
        .add_edge(START, "cancel")
        .add_edge("cancel", "after")
        .add_edge("after", END);

    let err = graph
        .compile()
        .unwrap()
        .invoke(
            TraceState::default(),
            Some(RunConfig::default().with_cancellation(token)),
        )
        .await
        .unwrap_err();

    assert!(matches!(&err, RunError::Cancelled { next_step, .. } if next_step == "after"));
    assert_eq!(err.state().visited(), vec!["cancel"]);
    assert_eq!(after.calls(), 0);
}
