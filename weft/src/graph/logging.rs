//! Logging utilities for graph execution.
//!
//! Structured `tracing` events for graph start/finish, node execution, state merges and
//! conditional routing.

use std::fmt::{Debug, Display};

/// Log node execution start. `step` is the 1-based invocation count of this run.
pub fn log_node_start(node_id: &str, step: usize) {
    tracing::debug!(node_id = node_id, step, "Starting node execution");
}

/// Log the state a node is about to read.
pub fn log_node_state<S: Debug>(node_id: &str, state: &S) {
    tracing::trace!(node_id = node_id, state = ?state, "Node execution: state");
}

pub fn log_node_complete(node_id: &str) {
    tracing::debug!(node_id = node_id, "Node execution complete");
}

/// Log the delta merged after a node ran.
pub fn log_state_update<U: Debug>(node_id: &str, update: &U) {
    tracing::debug!(node_id = node_id, update = ?update, "State updated");
}

/// Log a conditional routing decision.
pub fn log_routing(from: &str, key: &str, to: &str) {
    tracing::debug!(from = from, key = key, to = to, "conditional routing");
}

pub fn log_graph_start(entry: &str) {
    tracing::info!(entry = entry, "Starting graph execution");
}

pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps, "Graph execution complete");
}

pub fn log_graph_error(error: &dyn Display) {
    tracing::error!(error = %error, "Graph execution error");
}
