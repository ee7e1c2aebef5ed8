//! State graph: nodes + explicit edges (from → to) and optional conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using `START` and
//! `END` for entry/exit, and use `add_conditional_edges` to route on state. Then
//! `compile` to get a `CompiledStateGraph`.
//!
//! # Conditional edges
//!
//! After the source node runs and its update is merged, a routing function
//! `(state) -> key` is called. The key is the next node id, or is looked up in a path
//! map. A node must have exactly one outgoing `add_edge` or one `add_conditional_edges`.
//! Cycles are allowed; a run revisits steps until it reaches END or its step limit.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::channels::GraphState;
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// State graph: nodes plus explicit edges and optional conditional edges.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
/// Middleware is set via `with_middleware`, a default step limit via `with_step_limit`.
pub struct StateGraph<S: GraphState> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Edges (from_id, to_id).
    edges: Vec<(String, String)>,
    conditional_edges: HashMap<String, ConditionalRouter<S>>,
    /// Sources registered more than once with `add_conditional_edges`.
    duplicate_conditionals: Vec<String>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    step_limit: Option<usize>,
}

impl<S: GraphState> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: GraphState> StateGraph<S> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional_edges: HashMap::new(),
            duplicate_conditionals: Vec::new(),
            middleware: None,
            step_limit: None,
        }
    }

    /// Attaches node middleware; every step of the compiled graph runs through it.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Default maximum number of step invocations per run. No limit unless set here or in
    /// `RunConfig::step_limit` (which wins).
    pub fn with_step_limit(self, limit: usize) -> Self {
        Self {
            step_limit: Some(limit),
            ..self
        }
    }

    /// Adds a node; replaces any node with the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds a static edge from `from_id` to `to_id`. Use `START` for entry and `END` for exit.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Adds a conditional dispatch from `source`: the next node is determined by `path(state)`.
    ///
    /// - When `path_map` is `None`, the key is the next node id (or END). A key naming
    ///   no registered node fails the run with `RunError::UnknownStep`.
    /// - When `path_map` is `Some(map)`, the next node is `map[key]`; a key missing from the
    ///   map fails the run with `RunError::UnmappedRoute`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "decide",
    ///     Arc::new(tools_condition),
    ///     Some([("tools".into(), "tools".into()), ("end".into(), END.into())].into_iter().collect()),
    /// );
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> &mut Self {
        self.insert_conditional(source.into(), ConditionalRouter::new(path, path_map))
    }

    /// Like `add_conditional_edges` with a path map, but keys missing from the map go to
    /// `default` instead of failing the run.
    pub fn add_conditional_edges_with_default(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: HashMap<String, String>,
        default: impl Into<String>,
    ) -> &mut Self {
        let router = ConditionalRouter::new(path, Some(path_map)).with_default(default);
        self.insert_conditional(source.into(), router)
    }

    fn insert_conditional(&mut self, source: String, router: ConditionalRouter<S>) -> &mut Self {
        if self.conditional_edges.contains_key(&source) {
            self.duplicate_conditionals.push(source.clone());
        }
        self.conditional_edges.insert(source, router);
        self
    }

    fn is_target(&self, id: &str) -> bool {
        id == END || self.nodes.contains_key(id)
    }

    /// Walks forward from `first` over static edges and declared routes.
    /// A dispatch without a path map may return END at runtime, so it counts as reaching it.
    fn end_reachable_from(&self, first: &str) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![first];
        while let Some(id) = pending.pop() {
            if id == END {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(router) = self.conditional_edges.get(id) {
                if router.path_map.is_none() {
                    return true;
                }
                pending.extend(router.targets().map(String::as_str));
            }
            pending.extend(
                self.edges
                    .iter()
                    .filter(|(from, _)| from == id)
                    .map(|(_, to)| to.as_str()),
            );
        }
        false
    }

    /// Validates the graph and builds the executable form.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        for reserved in [START, END] {
            if self.nodes.contains_key(reserved) {
                return Err(CompilationError::ReservedNodeId(reserved.to_string()));
            }
        }
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if !self.is_target(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        if let Some(source) = self.duplicate_conditionals.first() {
            return Err(CompilationError::InvalidChain(format!(
                "multiple conditional dispatches from {}",
                source
            )));
        }
        for (source, router) in &self.conditional_edges {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            if let Some(path_map) = &router.path_map {
                for target in path_map.values() {
                    if !self.is_target(target) {
                        return Err(CompilationError::InvalidConditionalPathMap(target.clone()));
                    }
                }
            }
            if let Some(default) = &router.default {
                if !self.is_target(default) {
                    return Err(CompilationError::InvalidDefaultRoute(default.clone()));
                }
            }
        }

        let start_edges: Vec<&String> = self
            .edges
            .iter()
            .filter(|(f, _)| f == START)
            .map(|(_, t)| t)
            .collect();
        let first = match start_edges.as_slice() {
            [] => return Err(CompilationError::MissingStart),
            [only] => (*only).clone(),
            _ => {
                return Err(CompilationError::InvalidChain(
                    "multiple edges from START".into(),
                ))
            }
        };

        let mut edge_froms = HashSet::new();
        for (from, _) in self.edges.iter().filter(|(f, _)| f != START) {
            if !edge_froms.insert(from.as_str()) {
                return Err(CompilationError::InvalidChain(format!(
                    "multiple edges from {}",
                    from
                )));
            }
        }
        for source in self.conditional_edges.keys() {
            if edge_froms.contains(source.as_str()) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(
                    source.clone(),
                ));
            }
        }

        let mut ids: Vec<&String> = self.nodes.keys().collect();
        ids.sort();
        for id in ids {
            if !edge_froms.contains(id.as_str()) && !self.conditional_edges.contains_key(id) {
                return Err(CompilationError::MissingOutgoing(id.clone()));
            }
        }

        if !self.end_reachable_from(&first) {
            return Err(CompilationError::MissingEnd);
        }

        let mut next_map: HashMap<String, NextEntry<S>> = self
            .edges
            .into_iter()
            .filter(|(f, _)| f != START)
            .map(|(f, t)| (f, NextEntry::Unconditional(t)))
            .collect();
        for (source, router) in self.conditional_edges {
            next_map.insert(source, NextEntry::Conditional(router));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            next_map,
            middleware: self.middleware,
            step_limit: self.step_limit,
        })
    }
}
