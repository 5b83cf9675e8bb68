//! In-memory checkpointer (MemorySaver).
//!
//! Not persistent; for dev and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::memory::checkpoint::Checkpoint;
use crate::memory::checkpointer::{thread_key, CheckpointError, Checkpointer};
use crate::memory::config::RunnableConfig;

/// In-memory checkpointer. Key: `(thread_id, checkpoint_ns)`; each thread
/// keeps its checkpoints newest last.
///
/// **Interaction**: Used as `Arc<dyn Checkpointer<S>>` in
/// `StateGraph::compile_with_checkpointer`.
pub struct MemorySaver<S> {
    by_thread: Arc<RwLock<HashMap<String, Vec<Checkpoint<S>>>>>,
}

impl<S> MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates a new in-memory checkpointer.
    pub fn new() -> Self {
        Self {
            by_thread: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<S> Default for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(
        &self,
        config: &RunnableConfig,
        checkpoint: &Checkpoint<S>,
    ) -> Result<String, CheckpointError> {
        let key = thread_key(config)?;
        let mut guard = self.by_thread.write().await;
        guard.entry(key).or_default().push(checkpoint.clone());
        Ok(checkpoint.id.clone())
    }

    async fn get(&self, config: &RunnableConfig) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let key = thread_key(config)?;
        let guard = self.by_thread.read().await;
        Ok(guard.get(&key).and_then(|list| list.last().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: get returns None for a new thread, the latest put after.
    #[tokio::test]
    async fn put_then_get_returns_latest() {
        let saver: MemorySaver<i32> = MemorySaver::new();
        let config = RunnableConfig::for_thread("t1");

        assert!(saver.get(&config).await.unwrap().is_none());

        saver
            .put(&config, &Checkpoint::from_state(1, 0))
            .await
            .unwrap();
        saver
            .put(&config, &Checkpoint::from_state(2, 1))
            .await
            .unwrap();

        let latest = saver.get(&config).await.unwrap().expect("latest");
        assert_eq!(latest.state, 2);
    }

    /// **Scenario**: threads are isolated by key.
    #[tokio::test]
    async fn threads_are_isolated() {
        let saver: MemorySaver<i32> = MemorySaver::new();
        let a = RunnableConfig::for_thread("a");
        let b = RunnableConfig::for_thread("b");
        saver.put(&a, &Checkpoint::from_state(1, 0)).await.unwrap();

        assert!(saver.get(&b).await.unwrap().is_none());
        assert_eq!(saver.get(&a).await.unwrap().unwrap().state, 1);
    }

    /// **Scenario**: missing thread_id is an error, not a silent no-op.
    #[tokio::test]
    async fn missing_thread_id_is_an_error() {
        let saver: MemorySaver<i32> = MemorySaver::new();
        let err = saver
            .put(&RunnableConfig::default(), &Checkpoint::from_state(1, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckpointError::ThreadIdRequired));
    }
}
