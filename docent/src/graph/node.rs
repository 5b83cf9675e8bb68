//! Graph node trait: one step in a StateGraph.
//!
//! Receives state `S`, returns an update to merge and a [`Next`] routing
//! result (continue, jump, or end). Conditional edges: see
//! `StateGraph::add_conditional_edges`.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::WorkflowError;

/// Routing result of one node run.
///
/// `Continue` follows the node's outgoing edge (or conditional router);
/// `Node(id)` jumps directly; `End` stops the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Next {
    /// Follow the edge or conditional router registered for this node.
    Continue,
    /// Jump directly to the named node.
    Node(String),
    /// Stop the run after merging this node's update.
    End,
}

/// One step in a graph: state in, (update out, next step).
///
/// The returned state is an *update* merged into the current state by the
/// graph's `StateUpdater` (full replace by default). Nodes with partial
/// update semantics start from their state type's update base and fill in
/// only what changed.
///
/// **Interaction**: Registered via `StateGraph::add_node`; run by
/// `CompiledStateGraph::invoke`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"retrieve"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// One step: state in, (update out, next step).
    async fn run(&self, state: S) -> Result<(S, Next), WorkflowError>;
}
