//! Shared types for StateGraph integration tests: TraceState, RecordingNode, FailingNode.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use weft::{AgentError, Channel, GraphState, LastValue, Node, Topic};

/// `visited` appends (one entry per step run); `label` and `count` overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceState {
    pub visited: Topic<String>,
    pub label: LastValue<String>,
    pub count: LastValue<i32>,
}

#[derive(Debug, Default)]
pub struct TraceUpdate {
    pub visited: Vec<String>,
    pub label: Option<String>,
    pub count: Option<i32>,
}

impl GraphState for TraceState {
    type Update = TraceUpdate;

    fn merge(&mut self, update: TraceUpdate) {
        self.visited.merge(update.visited);
        self.label.merge(update.label);
        self.count.merge(update.count);
    }
}

impl TraceState {
    pub fn labelled(label: &str) -> Self {
        Self {
            label: LastValue::with_value(label.to_string()),
            ..Default::default()
        }
    }

    pub fn visited(&self) -> Vec<&str> {
        self.visited.iter().map(String::as_str).collect()
    }

    pub fn count(&self) -> i32 {
        self.count.get().copied().unwrap_or(0)
    }
}

/// Appends its id to `visited`, increments `count`, optionally sets `label`.
/// Counts its own invocations.
pub struct RecordingNode {
    id: String,
    sets_label: Option<String>,
    calls: AtomicUsize,
}

impl RecordingNode {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            sets_label: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn setting_label(id: &str, label: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            sets_label: Some(label.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Node<TraceState> for RecordingNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, state: &TraceState) -> Result<TraceUpdate, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TraceUpdate {
            visited: vec![self.id.clone()],
            label: self.sets_label.clone(),
            count: Some(state.count() + 1),
        })
    }
}

/// Always returns `ExecutionFailed`.
pub struct FailingNode;

#[async_trait]
impl Node<TraceState> for FailingNode {
    fn id(&self) -> &str {
        "failing"
    }

    async fn run(&self, _state: &TraceState) -> Result<TraceUpdate, AgentError> {
        Err(AgentError::ExecutionFailed("always fails".into()))
    }
}

/// Router that returns the current label (empty when unset).
pub fn route_on_label(state: &TraceState) -> String {
    state.label.get().cloned().unwrap_or_default()
}

pub fn path_map(pairs: &[(&str, &str)]) -> std::collections::HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
