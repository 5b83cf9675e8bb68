//! Compiled state graph: the executable produced by `StateGraph::compile`.
//!
//! `invoke` runs nodes from the entry edge until END, merging each node's
//! returned update through the graph's `StateUpdater` and then resolving the
//! next node from the node's [`Next`] and the edge table. With a
//! checkpointer and a `thread_id` in the config, the final state is saved
//! after the run.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::WorkflowError;
use crate::graph::conditional::NextEntry;
use crate::graph::node::{Next, Node};
use crate::graph::state_graph::END;
use crate::graph::updater::BoxedStateUpdater;
use crate::memory::{Checkpoint, Checkpointer, RunnableConfig};

/// Upper bound on node executions per run; a routing bug that loops is cut
/// off with an error instead of spinning forever.
const MAX_STEPS: usize = 64;

/// Executable graph: immutable node map + routing tables.
///
/// **Interaction**: Produced by `StateGraph::compile*`; driven by callers
/// through [`CompiledStateGraph::invoke`].
pub struct CompiledStateGraph<S> {
    pub(crate) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(crate) first_node_id: String,
    pub(crate) next_map: HashMap<String, NextEntry<S>>,
    pub(crate) checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    pub(crate) state_updater: BoxedStateUpdater<S>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Runs the graph to END and returns the final state.
    ///
    /// Each node receives a clone of the current state and returns an update
    /// that is merged before routing continues. When a checkpointer was
    /// attached at compile time and `config` carries a `thread_id`, the
    /// final state is persisted; a checkpoint write failure is logged and
    /// does not fail the run that produced the answer.
    pub async fn invoke(
        &self,
        state: S,
        config: Option<&RunnableConfig>,
    ) -> Result<S, WorkflowError> {
        let mut state = state;
        let mut current_id = self.first_node_id.clone();
        let mut steps = 0usize;

        loop {
            steps += 1;
            if steps > MAX_STEPS {
                return Err(WorkflowError::ExecutionFailed(format!(
                    "step limit {} exceeded at node {}",
                    MAX_STEPS, current_id
                )));
            }

            let node = self.nodes.get(&current_id).ok_or_else(|| {
                WorkflowError::ExecutionFailed(format!("node not found at runtime: {}", current_id))
            })?;

            debug!(node = %current_id, step = steps, "running node");
            let (update, next) = node.run(state.clone()).await?;
            self.state_updater.apply_update(&mut state, &update);

            let target = match next {
                Next::End => END.to_string(),
                Next::Node(id) => id,
                Next::Continue => match self.next_map.get(&current_id) {
                    Some(NextEntry::Unconditional(to)) => to.clone(),
                    Some(NextEntry::Conditional(router)) => router.resolve(&state),
                    // Terminal node without an explicit edge to END.
                    None => END.to_string(),
                },
            };

            if target == END {
                break;
            }
            current_id = target;
        }

        if let (Some(checkpointer), Some(config)) = (&self.checkpointer, config) {
            if config.thread_id.is_some() {
                let checkpoint = Checkpoint::from_state(state.clone(), steps as i64);
                if let Err(e) = checkpointer.put(config, &checkpoint).await {
                    warn!(error = %e, "failed to save checkpoint");
                }
            }
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::error::WorkflowError;
    use crate::graph::{Next, Node, StateGraph, END, START};
    use crate::memory::{Checkpointer, MemorySaver, RunnableConfig};

    #[derive(Clone, Debug, Default)]
    struct TraceState {
        visited: Vec<String>,
    }

    struct TraceNode {
        id: &'static str,
        next: Next,
    }

    #[async_trait]
    impl Node<TraceState> for TraceNode {
        fn id(&self) -> &str {
            self.id
        }
        async fn run(&self, mut state: TraceState) -> Result<(TraceState, Next), WorkflowError> {
            state.visited.push(self.id.to_string());
            Ok((state, self.next.clone()))
        }
    }

    fn trace_node(id: &'static str) -> Arc<TraceNode> {
        Arc::new(TraceNode {
            id,
            next: Next::Continue,
        })
    }

    /// **Scenario**: Linear chain runs nodes in edge order and stops at END.
    #[tokio::test]
    async fn invoke_runs_linear_chain_in_order() {
        let mut graph = StateGraph::<TraceState>::new();
        graph
            .add_node("a", trace_node("a"))
            .add_node("b", trace_node("b"))
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", END);
        let compiled = graph.compile().unwrap();

        let state = compiled.invoke(TraceState::default(), None).await.unwrap();
        assert_eq!(state.visited, vec!["a".to_string(), "b".to_string()]);
    }

    /// **Scenario**: Conditional edges route on merged state through the path map.
    #[tokio::test]
    async fn invoke_follows_conditional_edges() {
        let mut graph = StateGraph::<TraceState>::new();
        graph
            .add_node("a", trace_node("a"))
            .add_node("left", trace_node("left"))
            .add_node("right", trace_node("right"))
            .add_edge(START, "a")
            .add_edge("left", END)
            .add_edge("right", END);
        graph.add_conditional_edges(
            "a",
            Arc::new(|s: &TraceState| {
                if s.visited.contains(&"a".to_string()) {
                    "go_left".to_string()
                } else {
                    "go_right".to_string()
                }
            }),
            Some(
                [
                    ("go_left".to_string(), "left".to_string()),
                    ("go_right".to_string(), "right".to_string()),
                ]
                .into_iter()
                .collect(),
            ),
        );
        let compiled = graph.compile().unwrap();

        let state = compiled.invoke(TraceState::default(), None).await.unwrap();
        assert_eq!(state.visited, vec!["a".to_string(), "left".to_string()]);
    }

    /// **Scenario**: A node returning Next::End stops before its outgoing edge.
    #[tokio::test]
    async fn invoke_honors_next_end_from_node() {
        let mut graph = StateGraph::<TraceState>::new();
        graph
            .add_node(
                "a",
                Arc::new(TraceNode {
                    id: "a",
                    next: Next::End,
                }),
            )
            .add_node("b", trace_node("b"))
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", END);
        let compiled = graph.compile().unwrap();

        let state = compiled.invoke(TraceState::default(), None).await.unwrap();
        assert_eq!(state.visited, vec!["a".to_string()]);
    }

    /// **Scenario**: With a checkpointer and thread_id, the final state is saved.
    #[tokio::test]
    async fn invoke_saves_checkpoint_for_thread() {
        let mut graph = StateGraph::<TraceState>::new();
        graph.add_node("a", trace_node("a"));
        graph.add_edge(START, "a");
        graph.add_edge("a", END);

        let saver = Arc::new(MemorySaver::new());
        let compiled = graph.compile_with_checkpointer(saver.clone()).unwrap();

        let config = RunnableConfig::for_thread("t1");
        compiled
            .invoke(TraceState::default(), Some(&config))
            .await
            .unwrap();

        let loaded = saver.get(&config).await.unwrap().expect("checkpoint saved");
        assert_eq!(loaded.state.visited, vec!["a".to_string()]);
    }

    /// **Scenario**: A routing cycle is cut off with a step-limit error.
    #[tokio::test]
    async fn invoke_errors_on_runaway_cycle() {
        let mut graph = StateGraph::<TraceState>::new();
        graph.add_node(
            "a",
            Arc::new(TraceNode {
                id: "a",
                next: Next::Node("a".to_string()),
            }),
        );
        graph.add_edge(START, "a");
        graph.add_edge("a", END);
        let compiled = graph.compile().unwrap();

        let err = compiled.invoke(TraceState::default(), None).await.unwrap_err();
        assert!(err.to_string().contains("step limit"));
    }
}
