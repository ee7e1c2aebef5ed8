//! Graph visualization utilities.
//!
//! Exports a compiled graph as a Mermaid flowchart or a plain-text edge listing.
//! Output is sorted by node id so it is stable across runs.

use std::fmt::Write;

use crate::channels::GraphState;

use super::conditional::NextEntry;
use super::CompiledStateGraph;
use super::{END, START};

/// Generate a Mermaid `graph TD` flowchart.
///
/// Static edges are solid arrows; conditional routes are dotted arrows labelled with
/// their key (`default` for the default route). A dispatch without a path map can go
/// anywhere, so it is rendered as a comment.
pub fn generate_mermaid<S: GraphState>(graph: &CompiledStateGraph<S>) -> String {
    let mut out = String::from("graph TD\n");
    let _ = writeln!(out, "    {}([START])", START);
    for id in graph.node_ids() {
        let _ = writeln!(out, "    {}[{}]", id, id);
    }
    let _ = writeln!(out, "    {}([END])", END);
    let _ = writeln!(out, "    {} --> {}", START, graph.first_node_id);

    for id in graph.node_ids() {
        match graph.next_map.get(id) {
            Some(NextEntry::Unconditional(to)) => {
                let _ = writeln!(out, "    {} --> {}", id, to);
            }
            Some(NextEntry::Conditional(router)) => {
                let Some(map) = &router.path_map else {
                    let _ = writeln!(out, "    %% {} routes by node id", id);
                    continue;
                };
                let mut routes: Vec<_> = map.iter().collect();
                routes.sort();
                for (key, to) in routes {
                    let _ = writeln!(out, "    {} -.->|{}| {}", id, key, to);
                }
                if let Some(default) = &router.default {
                    let _ = writeln!(out, "    {} -.->|default| {}", id, default);
                }
            }
            None => {}
        }
    }
    out
}

/// Generate a simple text representation of the graph structure.
pub fn generate_text<S: GraphState>(graph: &CompiledStateGraph<S>) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Graph Structure:");
    let _ = writeln!(text, "Nodes: {}", graph.nodes.len());
    let _ = writeln!(text, "\nEdges:");
    let _ = writeln!(text, "  {} -> {}", START, graph.first_node_id);
    for id in graph.node_ids() {
        match graph.next_map.get(id) {
            Some(NextEntry::Unconditional(to)) => {
                let _ = writeln!(text, "  {} -> {}", id, to);
            }
            Some(NextEntry::Conditional(router)) => match &router.path_map {
                None => {
                    let _ = writeln!(text, "  {} -> <route>", id);
                }
                Some(map) => {
                    let mut routes: Vec<_> = map.iter().collect();
                    routes.sort();
                    let mut parts: Vec<String> =
                        routes.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                    if let Some(default) = &router.default {
                        parts.push(format!("*: {}", default));
                    }
                    let _ = writeln!(text, "  {} -> {{{}}}", id, parts.join(", "));
                }
            },
            None => {}
        }
    }
    text
}
