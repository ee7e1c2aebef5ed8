//! Conditional edges: route to the next node based on state.
//!
//! A source node has a routing function that takes the post-merge state and returns a
//! key. Without a path map the key is the next node id (or END). With a path map the key
//! must be one of the map's keys; anything else falls to the default route if one was
//! declared, and is otherwise an unmapped-route error.
//!
//! **Interaction**: Used by `StateGraph::add_conditional_edges` and the
//! `CompiledStateGraph` run loop.

use std::collections::HashMap;
use std::sync::Arc;

/// Router function: takes a reference to state and returns a routing key.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Outcome of evaluating a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Next node id, or END.
    Target(String),
    /// The key was not in the path map and no default route exists.
    Unmapped(String),
}

/// Conditional edge definition: routing function, optional path map, optional default.
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    pub(super) path: ConditionalRouterFn<S>,
    pub(super) path_map: Option<HashMap<String, String>>,
    pub(super) default: Option<String>,
}

impl<S> ConditionalRouter<S> {
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self {
            path,
            path_map,
            default: None,
        }
    }

    /// Target used when the key is missing from the path map.
    pub fn with_default(mut self, target: impl Into<String>) -> Self {
        self.default = Some(target.into());
        self
    }

    /// Evaluates the router on `state` and maps the key.
    ///
    /// Returns the raw key alongside the route so callers can log both.
    pub fn resolve_next(&self, state: &S) -> (String, Route) {
        let key = (self.path)(state);
        let route = match &self.path_map {
            None => Route::Target(key.clone()),
            Some(map) => match map.get(&key).or(self.default.as_ref()) {
                Some(target) => Route::Target(target.clone()),
                None => Route::Unmapped(key.clone()),
            },
        };
        (key, route)
    }

    /// Every statically known target (path map values plus default).
    pub(super) fn targets(&self) -> impl Iterator<Item = &String> {
        self.path_map
            .iter()
            .flat_map(|m| m.values())
            .chain(self.default.iter())
    }
}

/// How to determine the next node after a given node runs.
///
/// Stored in the compiled graph's next map: `Unconditional(to_id)` for a static edge,
/// `Conditional(router)` for a dispatch resolved from state.
#[derive(Clone)]
pub enum NextEntry<S> {
    Unconditional(String),
    Conditional(ConditionalRouter<S>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(map: Option<&[(&str, &str)]>) -> ConditionalRouter<String> {
        ConditionalRouter::new(
            Arc::new(|s: &String| s.clone()),
            map.map(|m| {
                m.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            }),
        )
    }

    #[test]
    fn key_is_node_id_without_path_map() {
        let r = router(None);
        assert_eq!(
            r.resolve_next(&"anything".to_string()).1,
            Route::Target("anything".into())
        );
    }

    #[test]
    fn mapped_and_unmapped_keys() {
        let r = router(Some(&[("billing", "handle_billing")]));
        assert_eq!(
            r.resolve_next(&"billing".to_string()).1,
            Route::Target("handle_billing".into())
        );
        assert_eq!(
            r.resolve_next(&"refund".to_string()),
            ("refund".to_string(), Route::Unmapped("refund".into()))
        );
    }

    #[test]
    fn default_route_catches_unmapped_keys() {
        let r = router(Some(&[("billing", "handle_billing")])).with_default("handle_general");
        assert_eq!(
            r.resolve_next(&"refund".to_string()).1,
            Route::Target("handle_general".into())
        );
        let targets: Vec<_> = r.targets().cloned().collect();
        assert!(targets.contains(&"handle_general".to_string()));
    }
}
