//! StateGraph compile failure cases through the public API.

use std::sync::Arc;

use weft::{CompilationError, StateGraph, END, START};

use crate::common::{path_map, route_on_label, RecordingNode, TraceState};

/// **Scenario**: an edge to an unregistered step fails with NodeNotFound.
#[test]
fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_edge(START, "a")
        .add_edge("a", "missing");

    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::NodeNotFound("missing".into()))
    );
}

/// **Scenario**: a step with both a static edge and a conditional dispatch is rejected.
#[test]
fn compile_fails_when_step_has_edge_and_dispatch() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_edge(START, "a")
        .add_edge("a", END)
        .add_conditional_edges("a", Arc::new(route_on_label), None);

    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::NodeHasBothEdgeAndConditional("a".into()))
    );
}

/// **Scenario**: a registered step with no way out is rejected, END is not a step.
#[test]
fn compile_fails_when_step_has_no_outgoing_edge() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_node("orphan", RecordingNode::new("orphan"))
        .add_edge(START, "a")
        .add_edge("a", END);

    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::MissingOutgoing("orphan".into()))
    );
}

/// **Scenario**: an edge into END that the entry step can never reach does not count; the
/// a <-> b cycle would spin forever, so compile rejects it.
#[test]
fn compile_fails_when_end_only_reachable_from_detached_step() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_node("b", RecordingNode::new("b"))
        .add_node("c", RecordingNode::new("c"))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .add_edge("b", "a")
        .add_edge("c", END);

    assert_eq!(graph.compile().err(), Some(CompilationError::MissingEnd));
}

/// **Scenario**: a route table that only leads back into the cycle cannot reach END either.
#[test]
fn compile_fails_when_routes_never_lead_to_end() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_node("b", RecordingNode::new("b"))
        .add_node("c", RecordingNode::new("c"))
        .add_edge(START, "a")
        .add_conditional_edges(
            "a",
            Arc::new(route_on_label),
            Some(path_map(&[("x", "b"), ("y", "a")])),
        )
        .add_edge("b", "a")
        .add_edge("c", END);

    assert_eq!(graph.compile().err(), Some(CompilationError::MissingEnd));
}

/// **Scenario**: END cannot be registered as a step.
#[test]
fn compile_fails_when_end_is_registered_as_step() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node(END, RecordingNode::new("end"))
        .add_edge(START, END);

    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::ReservedNodeId(END.into()))
    );
}

/// **Scenario**: a route table pointing at an unknown step is rejected before any run.
#[test]
fn compile_fails_when_route_target_is_unknown() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_edge(START, "a")
        .add_conditional_edges(
            "a",
            Arc::new(route_on_label),
            Some(path_map(&[("x", END), ("y", "nowhere")])),
        );

    assert_eq!(
        graph.compile().err(),
        Some(CompilationError::InvalidConditionalPathMap("nowhere".into()))
    );
}

/// **Scenario**: two entry edges are an invalid chain.
#[test]
fn compile_fails_with_two_entry_edges() {
    let mut graph = StateGraph::<TraceState>::new();
    graph
        .add_node("a", RecordingNode::new("a"))
        .add_node("b", RecordingNode::new("b"))
        .add_edge(START, "a")
        .add_edge(START, "b")
        .add_edge("a", END)
        .add_edge("b", END);

    assert!(matches!(
        graph.compile(),
        Err(CompilationError::InvalidChain(_))
    ));
}
