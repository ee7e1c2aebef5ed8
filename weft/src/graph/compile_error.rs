//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when the declared steps and edges do not form a
//! runnable graph.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// Validation ensures every edge endpoint (except START/END) is a registered node, there
/// is exactly one entry edge, every step has exactly one outgoing static edge or one
/// conditional dispatch, and END is reachable by some edge or route.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// A node id in an edge was not registered via `add_node` (and is not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge has from_id == START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// No static edge or route targets END.
    #[error("graph has no edge or route to END")]
    MissingEnd,

    /// More than one entry edge, or a step with more than one outgoing static edge.
    #[error("invalid edges: {0}")]
    InvalidChain(String),

    /// A node has both an outgoing edge and conditional edges; it must have exactly one.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A value in a conditional path_map is not a valid node id or END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),

    /// A default route target is not a valid node id or END.
    #[error("conditional default route invalid target: {0}")]
    InvalidDefaultRoute(String),

    /// A step has neither an outgoing edge nor a conditional dispatch.
    #[error("node has no outgoing edge: {0}")]
    MissingOutgoing(String),

    /// START and END are markers, not steps.
    #[error("reserved node id: {0}")]
    ReservedNodeId(String),
}
