//! State graph: nodes + edges + conditional dispatch, compile and invoke.
//!
//! Build a [`StateGraph`], `compile` it into a [`CompiledStateGraph`], then `invoke`
//! with an initial state. Steps return deltas that the state merges per field (see
//! [`crate::channels`]).

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod logging_middleware;
mod node;
mod node_middleware;
mod noop_node;
mod run_error;
mod state_graph;
mod visualization;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry, Route};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_routing, log_state_update,
};
pub use logging_middleware::LoggingNodeMiddleware;
pub use node::{FnNode, Node};
pub use node_middleware::{NodeMiddleware, NodeRunFn};
pub use noop_node::NoopNode;
pub use run_error::{RunConfig, RunError};
pub use state_graph::{StateGraph, END, START};
pub use visualization::{generate_mermaid, generate_text};
