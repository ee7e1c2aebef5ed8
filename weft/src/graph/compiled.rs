//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Runs steps strictly one at a time: invoke the
//! current step, merge its update, resolve the next step from the static edge or the
//! conditional router (evaluated on the post-merge state), repeat until END.

use std::collections::HashMap;
use std::sync::Arc;

use crate::channels::GraphState;
use crate::error::AgentError;

use super::conditional::Route;
use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_routing, log_state_update,
};
use super::node_middleware::NodeMiddleware;
use super::run_error::{RunConfig, RunError};
use super::state_graph::END;
use super::{NextEntry, Node};

/// Compiled graph: immutable structure, supports invoke only.
///
/// Cheap to clone (nodes are shared); one compiled graph can serve many concurrent runs.
#[derive(Clone)]
pub struct CompiledStateGraph<S: GraphState> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// First node to run (from START).
    pub(super) first_node_id: String,
    /// Map from node id to how to get next: Unconditional(to_id) or Conditional(router).
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) step_limit: Option<usize>,
}

impl<S: GraphState> CompiledStateGraph<S> {
    /// Entry step id.
    pub fn entry(&self) -> &str {
        &self.first_node_id
    }

    /// Registered step ids, sorted.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    async fn run_node(
        &self,
        node: Arc<dyn Node<S>>,
        node_id: &str,
        state: &S,
    ) -> Result<S::Update, AgentError> {
        match &self.middleware {
            Some(middleware) => {
                middleware
                    .around_run(
                        node_id,
                        state.clone(),
                        Box::new(move |s| Box::pin(async move { node.run(&s).await })),
                    )
                    .await
            }
            None => node.run(state).await,
        }
    }

    /// Runs the graph from the entry step until END.
    ///
    /// Returns the final merged state. On failure the error carries the last merged
    /// state (see [`RunError::state`]); no step runs after a failure. The step limit is
    /// `config.step_limit`, else the graph's `with_step_limit`, else unbounded.
    pub async fn invoke(&self, state: S, config: Option<RunConfig>) -> Result<S, RunError<S>> {
        let config = config.unwrap_or_default();
        let limit = config.step_limit.or(self.step_limit);
        let mut state = state;
        let mut current = self.first_node_id.clone();
        let mut steps = 0usize;

        log_graph_start(&current);
        loop {
            if current == END {
                log_graph_complete(steps);
                return Ok(state);
            }
            if config
                .cancellation
                .as_ref()
                .is_some_and(|token| token.is_cancelled())
            {
                let err = RunError::Cancelled {
                    next_step: current,
                    state,
                };
                log_graph_error(&err);
                return Err(err);
            }
            if let Some(limit) = limit {
                if steps >= limit {
                    let err = RunError::StepLimitExceeded { limit, state };
                    log_graph_error(&err);
                    return Err(err);
                }
            }
            let Some(node) = self.nodes.get(&current).cloned() else {
                let err = RunError::UnknownStep {
                    step: current,
                    state,
                };
                log_graph_error(&err);
                return Err(err);
            };

            steps += 1;
            log_node_start(&current, steps);
            log_node_state(&current, &state);
            let result = self.run_node(node, &current, &state).await;
            let update = match result {
                Ok(update) => update,
                Err(source) => {
                    let err = RunError::StepExecution {
                        step: current,
                        source,
                        state,
                    };
                    log_graph_error(&err);
                    return Err(err);
                }
            };
            log_node_complete(&current);
            log_state_update(&current, &update);
            state.merge(update);

            let next = match self.next_map.get(&current) {
                Some(NextEntry::Unconditional(to)) => to.clone(),
                Some(NextEntry::Conditional(router)) => match router.resolve_next(&state) {
                    (key, Route::Target(to)) => {
                        log_routing(&current, &key, &to);
                        to
                    }
                    (key, Route::Unmapped(_)) => {
                        let err = RunError::UnmappedRoute {
                            step: current,
                            key,
                            state,
                        };
                        log_graph_error(&err);
                        return Err(err);
                    }
                },
                // compile() rejects steps without an outgoing edge
                None => END.to_string(),
            };
            current = next;
        }
    }
}
