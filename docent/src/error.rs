//! Workflow execution error types.
//!
//! Used by `Node::run` and by every collaborator client (LLM, retriever,
//! notifier) at the point where a failure must cross a stage boundary.

use thiserror::Error;

/// Workflow execution error.
///
/// Returned by `Node::run` when a step fails in a way the stage cannot absorb.
/// Stage-local failures (retrieval down, unparsable score, webhook refused)
/// are absorbed per stage policy and never surface through this type.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Execution failed with a message (e.g. LLM call failed, state could not be loaded).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
