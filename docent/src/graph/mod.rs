//! State graph: nodes + edges, compile and invoke.
//!
//! Build with `StateGraph::add_node` / `add_edge` (using [`START`] and
//! [`END`]) and optional `add_conditional_edges`, then `compile()` into a
//! [`CompiledStateGraph`] and `invoke` it with a state.

mod compile_error;
mod compiled;
mod conditional;
mod node;
mod state_graph;
mod updater;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use node::{Next, Node};
pub use state_graph::{StateGraph, END, START};
pub use updater::{BoxedStateUpdater, FieldBasedUpdater, ReplaceUpdater, StateUpdater};
