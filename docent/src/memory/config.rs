//! Invoke config: thread_id and checkpoint namespace.
//!
//! Passed to `CompiledStateGraph::invoke` and to `Checkpointer` methods.

/// Config for a single invoke. Identifies the thread whose state is loaded
/// and saved.
///
/// When using a checkpointer, invoke must provide at least `thread_id`.
#[derive(Debug, Clone, Default)]
pub struct RunnableConfig {
    /// Unique id for this conversation thread. Required when using a checkpointer.
    pub thread_id: Option<String>,
    /// Optional namespace for checkpoints. Default is empty.
    pub checkpoint_ns: String,
}

impl RunnableConfig {
    /// Config for a thread with the default namespace.
    pub fn for_thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            checkpoint_ns: String::new(),
        }
    }
}
