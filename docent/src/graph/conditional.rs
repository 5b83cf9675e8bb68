//! Conditional edges: route to the next node based on state.
//!
//! A routing function `(state) -> key` runs after the source node; the key
//! is the next node id, or is looked up in an optional path map first.

use std::collections::HashMap;
use std::sync::Arc;

/// Routing function for conditional edges: merged state in, key out.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Conditional router: path function plus optional key -> node-id map.
pub struct ConditionalRouter<S> {
    pub path: ConditionalRouterFn<S>,
    pub path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S> {
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Resolves the next node id for `state`: path_map lookup when present,
    /// otherwise the key itself.
    pub fn resolve(&self, state: &S) -> String {
        let key = (self.path)(state);
        match &self.path_map {
            Some(map) => map.get(&key).cloned().unwrap_or(key),
            None => key,
        }
    }
}

impl<S> Clone for ConditionalRouter<S> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            path_map: self.path_map.clone(),
        }
    }
}

/// Outgoing routing for one node in a compiled graph.
pub enum NextEntry<S> {
    /// Single fixed edge to a node id (or END).
    Unconditional(String),
    /// Conditional router evaluated against the merged state.
    Conditional(ConditionalRouter<S>),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: resolve maps the key through path_map when present and
    /// passes it through otherwise.
    #[test]
    fn resolve_with_and_without_path_map() {
        let path: ConditionalRouterFn<i32> = Arc::new(|n| {
            if *n > 0 {
                "positive".to_string()
            } else {
                "other".to_string()
            }
        });

        let bare = ConditionalRouter::new(Arc::clone(&path), None);
        assert_eq!(bare.resolve(&1), "positive");

        let map: HashMap<String, String> =
            [("positive".to_string(), "node_a".to_string())].into_iter().collect();
        let mapped = ConditionalRouter::new(path, Some(map));
        assert_eq!(mapped.resolve(&1), "node_a");
        // Keys missing from the map fall through unchanged.
        assert_eq!(mapped.resolve(&-1), "other");
    }
}
