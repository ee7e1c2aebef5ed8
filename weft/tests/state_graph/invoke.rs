//! StateGraph invoke: linear chains and per-field merge rules.

use std::sync::Arc;

use weft::{FnNode, StateGraph, END, START};

use crate::common::{RecordingNode, TraceState, TraceUpdate};

/// **Scenario**: in an acyclic chain every step runs exactly once, in edge order.
#[tokio::test]
async fn acyclic_chain_runs_each_step_once() {
    let a = RecordingNode::new("a");
    let b = RecordingNode::new("b");
    let c = RecordingNode::new("c");
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", a.clone())
        .add_node("b", b.clone())
        .add_node("c", c.clone())
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", "c")
        .add_edge("c", END);

    let compiled = graph.compile().unwrap();
    let out = compiled.invoke(TraceState::default(), None).await.unwrap();

    assert_eq!(out.visited(), vec!["a", "b", "c"]);
    assert_eq!(out.count(), 3);
    assert_eq!((a.calls(), b.calls(), c.calls()), (1, 1, 1));
}

/// **Scenario**: appended fields accumulate, overwritten fields keep the latest value,
/// and fields a step leaves unset are untouched.
#[tokio::test]
async fn merge_rules_apply_per_field() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("first", RecordingNode::setting_label("first", "one"))
        .add_node("second", RecordingNode::setting_label("second", "two"))
        .add_node(
            "quiet",
            Arc::new(FnNode::new("quiet", |_s: TraceState| async {
                Ok(TraceUpdate::default())
            })),
        )
        .add_edge(START, "first")
        .add_edge("first", "second")
        .add_edge("second", "quiet")
        .add_edge("quiet", END);

    let mut initial = TraceState::labelled("zero");
    initial.visited = vec!["seed".to_string()].into();
    let out = graph.compile().unwrap().invoke(initial, None).await.unwrap();

    assert_eq!(out.visited(), vec!["seed", "first", "second"]);
    assert_eq!(out.label.get().map(String::as_str), Some("two"));
    assert_eq!(out.count(), 2);
}

/// **Scenario**: a compiled graph is reusable; each invoke starts from its own state.
#[tokio::test]
async fn compiled_graph_is_reusable_across_runs() {
    let a = RecordingNode::new("a");
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", a.clone())
        .add_edge(START, "a")
        .add_edge("a", END);
    let compiled = graph.compile().unwrap();

    let first = compiled.invoke(TraceState::default(), None).await.unwrap();
    let second = compiled.invoke(TraceState::default(), None).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(a.calls(), 2);
    assert_eq!(compiled.entry(), "a");
}
