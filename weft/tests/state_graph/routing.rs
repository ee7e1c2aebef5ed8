//! Conditional dispatch: route tables, default routes, unmapped keys and unknown steps.

use std::sync::Arc;

use weft::{RunError, StateGraph, END, START};

use crate::common::{path_map, route_on_label, RecordingNode, TraceState};

/// `classify` sets the label, then routes on it to `left` or `right`.
fn branching_graph(
    label: &str,
    left: Arc<RecordingNode>,
    right: Arc<RecordingNode>,
) -> StateGraph<TraceState> {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("classify", RecordingNode::setting_label("classify", label))
        .add_node("left", left)
        .add_node("right", right)
        .add_edge(START, "classify")
        .add_conditional_edges(
            "classify",
            Arc::new(route_on_label),
            Some(path_map(&[("l", "left"), ("r", "right")])),
        )
        .add_edge("left", END)
        .add_edge("right", END);
    graph
}

/// **Scenario**: the router sees the state after the source step's merge, so the label the
/// step just wrote decides the branch; the other branch never runs.
#[tokio::test]
async fn router_evaluates_post_merge_state() {
    let left = RecordingNode::new("left");
    let right = RecordingNode::new("right");
    let compiled = branching_graph("r", left.clone(), right.clone())
        .compile()
        .unwrap();

    // initial label says "l"; classify overwrites it with "r" before routing
    let out = compiled
        .invoke(TraceState::labelled("l"), None)
        .await
        .unwrap();

    assert_eq!(out.visited(), vec!["classify", "right"]);
    assert_eq!((left.calls(), right.calls()), (0, 1));
}

/// **Scenario**: a key missing from the route table fails with UnmappedRoute and no
/// further step is invoked; the error carries the merged state.
#[tokio::test]
async fn unmapped_key_fails_without_invoking_a_step() {
    let left = RecordingNode::new("left");
    let right = RecordingNode::new("right");
    let compiled = branching_graph("urgent", left.clone(), right.clone())
        .compile()
        .unwrap();

    let err = compiled
        .invoke(TraceState::default(), None)
        .await
        .unwrap_err();

    match &err {
        RunError::UnmappedRoute { step, key, state } => {
            assert_eq!(step, "classify");
            assert_eq!(key, "urgent");
            assert_eq!(state.visited(), vec!["classify"]);
        }
        other => panic!("expected UnmappedRoute, got {:?}", other),
    }
    assert_eq!((left.calls(), right.calls()), (0, 0));
    assert!(!err.is_recoverable());
}

/// **Scenario**: with a default route, an unmapped key goes to the default target.
#[tokio::test]
async fn unmapped_key_uses_default_route() {
    let fallback = RecordingNode::new("general");
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("classify", RecordingNode::setting_label("classify", "urgent"))
        .add_node("billing", RecordingNode::new("billing"))
        .add_node("general", fallback.clone())
        .add_edge(START, "classify")
        .add_conditional_edges_with_default(
            "classify",
            Arc::new(route_on_label),
            path_map(&[("billing", "billing")]),
            "general",
        )
        .add_edge("billing", END)
        .add_edge("general", END);

    let out = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap();

    assert_eq!(out.visited(), vec!["classify", "general"]);
    assert_eq!(fallback.calls(), 1);
}

/// **Scenario**: without a route table the key is the next step id; an id that is not a
/// registered step fails with UnknownStep.
#[tokio::test]
async fn unmapped_router_to_unknown_step_fails_at_runtime() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::setting_label("a", "ghost"))
        .add_edge(START, "a")
        .add_conditional_edges("a", Arc::new(route_on_label), None);

    let err = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap_err();

    match err {
        RunError::UnknownStep { step, state } => {
            assert_eq!(step, "ghost");
            assert_eq!(state.visited(), vec!["a"]);
        }
        other => panic!("expected UnknownStep, got {:?}", other),
    }
}

/// **Scenario**: without a route table the key can be END, which finishes the run.
#[tokio::test]
async fn router_without_table_can_return_end() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::setting_label("a", END))
        .add_edge(START, "a")
        .add_conditional_edges("a", Arc::new(route_on_label), None);

    let out = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap();
    assert_eq!(out.visited(), vec!["a"]);
}

/// **Scenario**: a cycle revisits steps until the router picks END.
#[tokio::test]
async fn cycle_runs_until_router_ends() {
    let body = RecordingNode::new("body");
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("body", body.clone())
        .add_edge(START, "body")
        .add_conditional_edges(
            "body",
            Arc::new(|s: &TraceState| {
                if s.count() < 4 {
                    "again".to_string()
                } else {
                    "done".to_string()
                }
            }),
            Some(path_map(&[("again", "body"), ("done", END)])),
        );

    let out = graph
        .compile()
        .unwrap()
        .invoke(TraceState::default(), None)
        .await
        .unwrap();

    assert_eq!(out.count(), 4);
    assert_eq!(body.calls(), 4);
}
