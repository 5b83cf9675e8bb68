//! Checkpointer trait and CheckpointError.
//!
//! Saves and loads checkpoints by `(thread_id, checkpoint_ns)`.

use async_trait::async_trait;

use crate::memory::checkpoint::Checkpoint;
use crate::memory::config::RunnableConfig;

/// Error type for checkpoint operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("thread_id required")]
    ThreadIdRequired,
    #[error("serialization: {0}")]
    Serialization(String),
    #[error("storage: {0}")]
    Storage(String),
}

/// Saves and loads checkpoints by `(thread_id, checkpoint_ns)`.
///
/// **Interaction**: Injected at compile via
/// `StateGraph::compile_with_checkpointer`; `CompiledStateGraph::invoke`
/// calls `put` after the run, and the workflow facade calls `get` before.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Persist a checkpoint for the thread. Returns the checkpoint id used.
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError>;

    /// Load the latest checkpoint for the thread, or None when the thread is new.
    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint<S>>, CheckpointError>;
}

/// Thread key shared by saver implementations: `thread_id:checkpoint_ns`.
pub(crate) fn thread_key(config: &RunnableConfig) -> Result<String, CheckpointError> {
    let thread_id = config
        .thread_id
        .as_deref()
        .ok_or(CheckpointError::ThreadIdRequired)?;
    Ok(format!("{}:{}", thread_id, config.checkpoint_ns))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of each CheckpointError variant contains expected keywords.
    #[test]
    fn checkpoint_error_display_all_variants() {
        assert!(CheckpointError::ThreadIdRequired
            .to_string()
            .contains("thread"));
        assert!(CheckpointError::Serialization("err".into())
            .to_string()
            .contains("serialization"));
        assert!(CheckpointError::Storage("io".into())
            .to_string()
            .contains("storage"));
    }

    /// **Scenario**: thread_key requires a thread id and joins with the namespace.
    #[test]
    fn thread_key_requires_thread_id() {
        assert!(matches!(
            thread_key(&RunnableConfig::default()),
            Err(CheckpointError::ThreadIdRequired)
        ));
        let key = thread_key(&RunnableConfig::for_thread("t1")).unwrap();
        assert_eq!(key, "t1:");
    }
}
